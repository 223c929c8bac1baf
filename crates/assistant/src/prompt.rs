//! Prompt templates.

/// Seed message of every conversation.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant specialized in analyzing student data and providing insights.

IMPORTANT: You have direct access to actual student data in the context provided below. Always base your responses on this specific data.

When analyzing the data, you should:
1. Use actual numbers and scores from the provided student data
2. Make specific references to student names and their performance
3. Compare scores across subjects when relevant
4. Identify patterns in the data provided
5. Provide concrete, data-backed recommendations

The student data includes:
- Name, Class, and Section
- Individual subject scores (Math, Science, English)
- Total scores and overall grades

Always refer to specific data points in your responses to show that you're using the actual information provided.";

/// Wrap a user question together with the retrieved student context.
pub fn enhanced_message(context: &str, question: &str) -> String {
    format!(
        "
STUDENT DATA FOR ANALYSIS:
------------------------
{context}

YOUR TASK:
------------------------
Question: {question}

INSTRUCTIONS:
1. Use ONLY the student data provided above
2. Include specific numbers and scores in your analysis
3. Reference student names when discussing their performance
4. Make clear comparisons between students or subjects where relevant
5. Base all insights and recommendations on the actual data shown

Please provide a detailed analysis based on this specific student data."
    )
}

/// Wrap a free-form analysis request.
pub fn analytics_prompt(query: &str) -> String {
    format!(
        "Based on the provided data, please analyze: {query}
Focus on:
- Relevant statistical patterns
- Key performance indicators
- Actionable recommendations
- Supporting data points"
    )
}
