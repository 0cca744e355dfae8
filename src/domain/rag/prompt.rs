//! Prompt templates for translation and answer generation

/// Grounded-answer prompt: the model may only use the supplied literature
/// context, must flag unstated information, and must cite PMIDs.
pub fn grounded_prompt(context: &str, question: &str) -> String {
    format!(
        "あなたは医療文献に基づいて回答する医療AIアシスタントです。\n\
         \n\
         【重要な制約】\n\
         1. 提供された医学文献の情報のみを使用して回答してください\n\
         2. 医学的診断や治療の助言は行わず、文献情報の要約に留めてください\n\
         3. 不確実な情報については明確に「文献では言及されていません」と述べてください\n\
         4. 回答の最後に参考文献のPMIDを必ず記載してください\n\
         \n\
         【回答形式】\n\
         - 簡潔で分かりやすい日本語で回答\n\
         - 根拠となる文献情報を明示\n\
         - 医療従事者への相談を推奨する文言を含める\n\
         \n\
         以下の医学文献を参考にして、ユーザーの質問に回答してください：\n\
         \n\
         {context}\n\
         \n\
         質問: {question}\n\
         \n\
         回答:"
    )
}

/// Ungrounded-answer prompt: general information only, no
/// diagnosis/treatment advice, uncertainty flagged, professional
/// consultation recommended.
pub fn ungrounded_prompt(question: &str) -> String {
    format!(
        "あなたは医療分野の一般的な情報を提供するAIアシスタントです。\n\
         \n\
         【重要な制約】\n\
         1. 一般的な医学情報の提供に留めてください\n\
         2. 医学的診断や治療の助言は行わないでください\n\
         3. 不確実な情報については明確にその旨を述べてください\n\
         4. 医療従事者への相談を推奨する文言を含めてください\n\
         \n\
         質問: {question}\n\
         \n\
         回答:"
    )
}

/// Query-translation prompt: terminology-precise English, nothing else.
pub fn translation_prompt(query: &str) -> String {
    format!(
        "Translate this Japanese medical query to English. \
         Use precise medical terminology. \
         Give only the English translation, no explanations.\n\
         \n\
         Japanese: {query}\n\
         English:"
    )
}
