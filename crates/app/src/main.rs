//! tracker - student progress tracker
//!
//! Command-line front end over the students REST API and the assistant.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tracker_app::pages::{ChatPanel, DetailsPage, FormPage, ListPage};
use tracker_app::{AppConfig, AppError};
use tracker_assistant::{ChatService, ContextRetriever, GeminiApi, NoContext, RosterContext};
use tracker_client::{HttpStudentStore, StudentStore};
use tracker_core::form::FormField;
use tracker_core::grading::evaluate_inputs;
use tracker_core::{DisplayRecord, FilterCriteria, SortDirection, SortField, SortState};
use tracker_events::{Notifier, ToastListener, ToastService};

#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List students, optionally filtered and sorted
    #[command(alias = "ls")]
    List {
        /// Case-insensitive name fragment
        #[arg(long)]
        name: Option<String>,

        /// Exact class number
        #[arg(long)]
        class: Option<String>,

        /// Exact section letter
        #[arg(long)]
        section: Option<String>,

        /// Column to sort by (e.g. name, lastName, total)
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Show one student
    Show {
        /// Student id
        id: String,
    },

    /// Add a student
    Add(StudentArgs),

    /// Edit a student; omitted fields keep their value
    Edit {
        /// Student id
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a student
    Delete {
        /// Student id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Compute total and grade for three scores
    Grade {
        math: String,
        science: String,
        english: String,
    },

    /// Ask the assistant a question
    Ask {
        /// Question text
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,

        /// Send the current roster as context
        #[arg(long)]
        with_roster: bool,
    },
}

#[derive(Args, Debug)]
struct StudentArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    class: String,
    #[arg(long)]
    section: String,
    #[arg(long)]
    math: String,
    #[arg(long)]
    science: String,
    #[arg(long)]
    english: String,
}

#[derive(Args, Debug)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    class: Option<String>,
    #[arg(long)]
    section: Option<String>,
    #[arg(long)]
    math: Option<String>,
    #[arg(long)]
    science: Option<String>,
    #[arg(long)]
    english: Option<String>,
}

impl StudentArgs {
    fn values(self) -> [(FormField, String); 6] {
        [
            (FormField::Name, self.name),
            (FormField::Class, self.class),
            (FormField::Section, self.section),
            (FormField::Math, self.math),
            (FormField::Science, self.science),
            (FormField::English, self.english),
        ]
    }
}

impl EditArgs {
    fn values(self) -> Vec<(FormField, String)> {
        [
            (FormField::Name, self.name),
            (FormField::Class, self.class),
            (FormField::Section, self.section),
            (FormField::Math, self.math),
            (FormField::Science, self.science),
            (FormField::English, self.english),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "tracker_app=info,tracker_client=info,tracker_assistant=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, "Loaded configuration");

    // --- Toasts ---
    let toasts = Arc::new(ToastService::new(config.toast));
    let listener = tokio::spawn(ToastListener::run(toasts.subscribe(), |toast| {
        eprintln!("[{}] {}", toast.kind.as_str(), toast.message);
    }));
    let cancel = CancellationToken::new();
    let reaper = tokio::spawn({
        let toasts = Arc::clone(&toasts);
        let cancel = cancel.clone();
        async move { toasts.run_reaper(cancel).await }
    });

    // --- Store ---
    let store = Arc::new(
        HttpStudentStore::new(config.api_url.clone(), config.request_timeout)
            .context("Failed to build HTTP client")?,
    );

    let result = run(cli.command, &config, store, Arc::clone(&toasts) as Arc<dyn Notifier>).await;

    // --- Shutdown ---
    cancel.cancel();
    reaper.await.context("Toast reaper panicked")?;
    drop(toasts);
    listener.await.context("Toast listener panicked")?;

    result
}

async fn run(
    command: Commands,
    config: &AppConfig,
    store: Arc<HttpStudentStore>,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    match command {
        Commands::List {
            name,
            class,
            section,
            sort,
            desc,
        } => {
            let mut page = ListPage::new(store, notifier);
            page.set_filters(FilterCriteria {
                name: name.unwrap_or_default(),
                class: class.unwrap_or_default(),
                section: section.unwrap_or_default(),
            });
            if let Some(field) = sort {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                page.set_sort(SortState::by(field, direction));
            }
            page.load().await.context("Failed to load students")?;
            print_table(page.rows());
        }

        Commands::Show { id } => {
            let mut page = DetailsPage::new(store);
            let student = page.load(&id).await.context("Failed to load student")?;
            print_details(student);
        }

        Commands::Add(fields) => {
            let mut page = FormPage::create(store, notifier);
            for (field, value) in fields.values() {
                page.set(field, value);
            }
            submit(&mut page).await?;
        }

        Commands::Edit { id, fields } => {
            let mut page = FormPage::edit(store, notifier, id);
            page.load().await.context("Failed to load student")?;
            for (field, value) in fields.values() {
                page.set(field, value);
            }
            submit(&mut page).await?;
        }

        Commands::Delete { id, yes } => {
            let mut page = ListPage::new(store, notifier);
            let confirm = |message: &str| yes || prompt_confirm(message);
            if !page.delete(&id, &confirm).await? {
                eprintln!("Cancelled");
            }
        }

        Commands::Grade {
            math,
            science,
            english,
        } => {
            let card = evaluate_inputs(&math, &science, &english);
            println!("Total: {}", card.total);
            println!("Grade: {}", card.grade);
        }

        Commands::Ask {
            question,
            with_roster,
        } => {
            let model = GeminiApi::new(&config.assistant).context("Assistant is not configured")?;
            let question = question.join(" ");
            if with_roster {
                let students = store.list().await.context("Failed to load students")?;
                ask(model, RosterContext::new(&students), &question).await;
            } else {
                ask(model, NoContext, &question).await;
            }
        }
    }
    Ok(())
}

async fn submit(page: &mut FormPage<HttpStudentStore>) -> Result<()> {
    match page.submit().await {
        Ok(_) => {
            println!("Total: {}", page.form().total());
            println!("Grade: {}", page.form().grade());
            Ok(())
        }
        Err(e @ AppError::Validation(_)) => {
            for violation in e.violations() {
                eprintln!("{}: {}", violation.field, violation.message);
            }
            bail!("Student is invalid")
        }
        Err(e) => Err(e).context("Failed to save student"),
    }
}

async fn ask<R: ContextRetriever>(model: GeminiApi, retriever: R, question: &str) {
    let mut panel = ChatPanel::new(ChatService::new(model, retriever));
    if let Some(reply) = panel.send(question).await {
        println!("{}", reply.content);
    }
}

fn prompt_confirm(message: &str) -> bool {
    eprint!("{message} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

// ---- output ----

fn print_table(rows: &[DisplayRecord]) {
    println!(
        "{:<6} {:<12} {:<14} {:>5} {:<7} {:>4} {:>7} {:>7} {:>5} {:<5}",
        "ID", "FIRST", "LAST", "CLASS", "SECTION", "MATH", "SCIENCE", "ENGLISH", "TOTAL", "GRADE"
    );
    for row in rows {
        let r = &row.record;
        println!(
            "{:<6} {:<12} {:<14} {:>5} {:<7} {:>4} {:>7} {:>7} {:>5} {:<5}",
            r.id,
            row.first_name,
            row.last_name,
            r.class,
            r.section,
            r.math,
            r.science,
            r.english,
            r.total,
            r.grade
        );
    }
    if rows.is_empty() {
        println!("No students found");
    }
}

fn print_details(student: &DisplayRecord) {
    let r = &student.record;
    println!("ID:         {}", r.id);
    println!("First name: {}", student.first_name);
    println!("Last name:  {}", student.last_name);
    println!("Class:      {}", r.class);
    println!("Section:    {}", r.section);
    println!("Math:       {}", r.math);
    println!("Science:    {}", r.science);
    println!("English:    {}", r.english);
    println!("Total:      {}", r.total);
    println!("Grade:      {} ({})", r.grade, r.grade.badge_class());
}
