//! Prompt templates and fixed fallback strings.

use std::fmt::Write;

use crate::core::SearchableItem;

/// Number of content characters of each note embedded in a search prompt.
pub const CONTENT_PREVIEW_CHARS: usize = 200;

/// System message sent ahead of every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps users search, \
summarize, and understand their personal notes. Be accurate and concise.";

pub const NO_NOTES_REASONING: &str = "No notes available to search.";
pub const NO_REASONING: &str = "No reasoning provided.";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_ANSWER: &str = "I could not generate an answer.";
pub const NO_CHAT_RESPONSE: &str = "I'm sorry, I couldn't generate a response.";

pub(crate) fn search_prompt(query: &str, notes: &[SearchableItem], limit: usize) -> String {
    let mut prompt = format!(
        "Find the notes most relevant to the following query.\n\nQuery: {query}\n\nNotes:\n"
    );

    for (index, note) in notes.iter().enumerate() {
        let preview: String = note.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
        // Writing into a String cannot fail.
        let _ = write!(
            prompt,
            "\n[{index}]\nPath: {}\nContent: {preview}\n",
            note.path
        );
    }

    let _ = write!(
        prompt,
        "\nRespond with a JSON object with two fields:\n\
         - \"reasoning\": a short explanation of why the selected notes match the query\n\
         - \"results\": an array of at most {limit} note indices (integers), most relevant first\n"
    );

    prompt
}

pub(crate) fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following note in two or three sentences. \
         Keep the key facts, names, and dates.\n\n{content}"
    )
}

pub(crate) fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer the question using only the context below. If the context does not \
         contain enough information to answer, say that you don't know instead of \
         making something up.\n\nContext:\n{context}\n\nQuestion: {question}"
    )
}
