//! Reference sentence sets.
//!
//! A reference set characterizes "natural" text for one language: the scorer
//! compares candidates against the centroid of these sentences and against
//! the nearest few individually. The contract callers rely on: deterministic,
//! non-empty, and the same language always yields the same sentences in the
//! same order.


use crate::constants::DEFAULT_LANGUAGE;

/// Everyday English sentences spanning common registers (conversation,
/// description, instruction, narration).
pub const ENGLISH: &[&str] = &[
    "The meeting has been moved to three o'clock on Thursday afternoon.",
    "She poured herself a cup of coffee and sat down by the window.",
    "Please let me know if you have any questions about the schedule.",
    "The train was delayed by twenty minutes because of heavy snow.",
    "He spent the weekend repainting the fence behind the house.",
    "Thank you for your patience while we sort this out.",
    "The restaurant on the corner serves the best soup in town.",
    "I'll send you the updated report first thing tomorrow morning.",
    "The children walked home from school along the river path.",
    "Remember to save your work before closing the application.",
    "The weather forecast says it will clear up by the afternoon.",
    "We took a wrong turn and ended up in a quiet little village.",
    "Her latest novel explores the friendship between two neighbors.",
    "Could you pass me the salt when you get a chance?",
    "The museum is open every day except Monday during the summer.",
    "After dinner they played cards until well past midnight.",
    "The committee agreed to revisit the proposal next quarter.",
    "A light rain began to fall just as the match started.",
    "He apologized for the confusion and offered to reschedule.",
    "The bakery smells wonderful early in the morning.",
    "I'm not sure whether the store is still open at this hour.",
    "They planted tomatoes and basil in the garden this spring.",
    "The lecture covered the history of printing in some detail.",
    "Make sure the lid is sealed tightly before you shake it.",
];

/// Everyday Japanese sentences, matched in register to [`ENGLISH`].
pub const JAPANESE: &[&str] = &[
    "会議は木曜日の午後三時に変更になりました。",
    "彼女はコーヒーを入れて窓際に腰を下ろした。",
    "日程についてご不明な点があればお知らせください。",
    "大雪の影響で電車が二十分ほど遅れていました。",
    "彼は週末を使って家の裏の塀を塗り直した。",
    "ご対応いただきありがとうございます。",
    "角のレストランはこの町で一番おいしいスープを出す。",
    "更新した報告書は明日の朝一番にお送りします。",
    "子どもたちは川沿いの道を歩いて学校から帰った。",
    "アプリを閉じる前に作業内容を保存してください。",
    "天気予報によると午後には晴れるそうです。",
    "道を間違えて静かな小さな村に着いてしまった。",
    "彼女の新しい小説は隣人同士の友情を描いている。",
    "手が空いたら塩を取ってもらえますか。",
    "美術館は夏の間、月曜日を除いて毎日開いています。",
    "夕食の後、夜中過ぎまでトランプをして遊んだ。",
    "委員会は来期に提案を再検討することで合意した。",
    "試合が始まった途端に小雨が降り出した。",
    "彼は混乱をわびて、日程の変更を申し出た。",
    "朝早くのパン屋はとてもいい香りがする。",
    "この時間にお店がまだ開いているかわかりません。",
    "今年の春は庭にトマトとバジルを植えました。",
    "講義では印刷の歴史がかなり詳しく扱われた。",
    "振る前にふたがしっかり閉まっているか確認してください。",
];

/// Returns the reference sentences for a language code.
///
/// Deterministic: the same code always yields the same set in the same
/// order. Region subtags are ignored (`en-US` resolves like `en`) and
/// unknown languages fall back to English.
pub fn reference_sentences(language: &str) -> &'static [&'static str] {
    match canonical_language(language).as_str() {
        "ja" => JAPANESE,
        _ => ENGLISH,
    }
}

/// Language codes with a dedicated reference set.
pub fn supported_languages() -> &'static [&'static str] {
    &["en", "ja"]
}

/// Normalizes a language code to the form used as a cache key: lowercase
/// primary subtag, defaulting to [`DEFAULT_LANGUAGE`] when empty.
pub fn canonical_language(language: &str) -> String {
    let subtag = primary_subtag(language);
    if subtag.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        subtag.to_lowercase()
    }
}

fn primary_subtag(language: &str) -> &str {
    language
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
}
