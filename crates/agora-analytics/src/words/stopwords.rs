//! Stop-word lists keyed by locale.

const EN: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its",
    "itself", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "very", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

const FR: &[&str] = &[
    "alors", "aucun", "aussi", "autre", "avant", "avec", "avoir", "bon", "car", "ceci", "cela",
    "celle", "celles", "celui", "ces", "cet", "cette", "ceux", "chaque", "comme", "comment",
    "dans", "des", "donc", "dont", "elle", "elles", "encore", "entre", "est", "été", "étaient",
    "était", "être", "eux", "fait", "faire", "ici", "ils", "les", "leur", "leurs", "lui", "mais",
    "même", "mes", "moi", "mon", "nos", "notre", "nous", "par", "parce", "pas", "peu", "peut",
    "plus", "pour", "pourquoi", "quand", "que", "quel", "quelle", "quelles", "quels", "qui",
    "sans", "ses", "seulement", "sien", "son", "sont", "sous", "sur", "tandis", "tellement",
    "tes", "toi", "ton", "tous", "tout", "toute", "toutes", "très", "une", "vos", "votre",
    "vous",
];

/// Stop words of `locale` (language subtag only). Unknown locales have none.
pub fn stop_words(locale: &str) -> &'static [&'static str] {
    let lang = locale.split(['_', '-']).next().unwrap_or(locale);
    match lang.to_ascii_lowercase().as_str() {
        "en" => EN,
        "fr" => FR,
        _ => &[],
    }
}

/// Whether `word` (already lowercased) is a stop word in any of `locales`.
pub fn is_stop_word<S: AsRef<str>>(word: &str, locales: &[S]) -> bool {
    locales
        .iter()
        .any(|locale| stop_words(locale.as_ref()).contains(&word))
}
