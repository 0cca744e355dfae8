//! Context assembly: ranked results into one bounded prompt block

use super::messages::NO_CONTEXT_MESSAGE;
use crate::domain::retrieval::SearchResult;

/// Width of the rule line separating literature blocks
const RULE_WIDTH: usize = 80;

/// Maximum number of authors rendered per block
const MAX_CONTEXT_AUTHORS: usize = 2;

/// Serialize ranked results into the context block handed to the generator.
///
/// Input order is kept (descending similarity per the retriever). Empty
/// input yields a fixed sentence so the generation step always receives
/// non-empty context.
pub fn assemble_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_CONTEXT_MESSAGE.to_string();
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, result)| format_block(i + 1, result))
        .collect();

    let rule = format!("\n{}\n", "=".repeat(RULE_WIDTH));
    blocks.join(&rule)
}

fn format_block(label: usize, result: &SearchResult) -> String {
    let metadata = &result.metadata;
    let mut block = format!("【文献{label}】");

    if let Some(title) = &metadata.title {
        block.push_str(&format!(" {title}"));
    }

    if !metadata.authors.is_empty() {
        let authors: Vec<&str> = metadata
            .authors
            .iter()
            .take(MAX_CONTEXT_AUTHORS)
            .map(String::as_str)
            .collect();
        block.push_str(&format!(" (著者: {})", authors.join(", ")));
    }

    if let Some(journal) = &metadata.journal {
        block.push_str(&format!(" - {journal}"));
    }

    if let Some(date) = &metadata.publication_date {
        block.push_str(&format!(" ({date})"));
    }

    if !metadata.pmid.is_empty() {
        block.push_str(&format!(" [PMID: {}]", metadata.pmid));
    }

    block.push_str(&format!("\n類似度: {:.3}\n", result.similarity_score));
    block.push_str(&format!("内容: {}\n", result.content));
    block
}
