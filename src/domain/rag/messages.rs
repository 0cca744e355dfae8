//! Fixed user-facing answer strings
//!
//! Degraded conditions are surfaced as answer text rather than errors, so
//! these strings double as failure markers: a response whose
//! `generation_time_ms` is zero and whose answer equals one of them signals
//! a failed or skipped generation stage.

/// Answer when retrieval finds nothing above the threshold
pub const NO_RESULTS_ANSWER: &str =
    "申し訳ございませんが、ご質問に関連する医学文献が見つかりませんでした。異なるキーワードで再度お試しください。";

/// Context block handed to the generator when there are no results
pub const NO_CONTEXT_MESSAGE: &str = "関連する医学文献が見つかりませんでした。";

/// Answer when the generation call exceeds its timeout
pub const TIMEOUT_ANSWER: &str =
    "回答生成がタイムアウトしました。より簡潔な質問で再試行してください。";

/// Answer when the generation service is unreachable
pub const CONNECTION_ANSWER: &str =
    "Ollamaサーバーに接続できません。サーバーが起動しているか確認してください。";

/// Answer when the model returns empty output
pub const EMPTY_GENERATION_ANSWER: &str = "回答の生成に失敗しました。";

/// Answer for any other generation failure, carrying the error detail
pub fn generation_failure_answer(detail: &str) -> String {
    format!("回答生成中にエラーが発生しました: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_answer_embeds_detail() {
        let answer = generation_failure_answer("status 500");
        assert!(answer.contains("status 500"));
        assert!(answer.starts_with("回答生成中にエラーが発生しました"));
    }
}
