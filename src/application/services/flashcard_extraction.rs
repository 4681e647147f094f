use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FlashcardDraft;

use super::text_cleaning::{collapse_whitespace, split_sentences};

/// Upper bound on cards per extraction, whatever the caller asks for.
pub const MAX_FLASHCARDS: usize = 15;

const MIN_SIDE_CHARS: usize = 10;
const MIN_RESPONSE_SENTENCE_CHARS: usize = 20;
const MIN_CONTENT_SENTENCE_CHARS: usize = 30;
const PLACEHOLDER_TERM: &str = "this topic";

/// Generic question words and words echoed back from the generation prompt.
const STOPLIST: [&str; 28] = [
    "the",
    "this",
    "that",
    "these",
    "those",
    "what",
    "when",
    "where",
    "which",
    "who",
    "why",
    "how",
    "there",
    "during",
    "extract",
    "important",
    "sentences",
    "text",
    "could",
    "used",
    "educational",
    "flashcards",
    "focus",
    "definitions",
    "processes",
    "concepts",
    "summarize",
    "summary",
];

static LIST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)\d+\.\s+").unwrap());
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static QUESTION_SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+\?").unwrap());

/// What every matcher sees: the model response, the cleaned source content
/// and the number of cards wanted.
#[derive(Debug, Clone)]
pub struct ExtractionInput<'a> {
    pub response: &'a str,
    pub content: &'a str,
    pub limit: usize,
}

/// One pattern family of the cascade. An empty result means "no match".
pub trait QaMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, input: &ExtractionInput<'_>) -> Vec<FlashcardDraft>;
}

/// `Q: ... A: ...` style markers. Each question marker opens a segment that
/// runs until the next question marker.
pub struct MarkerMatcher {
    name: &'static str,
    question: Regex,
    answer: Regex,
}

impl MarkerMatcher {
    pub fn short_markers() -> Self {
        Self {
            name: "q_a_markers",
            question: Regex::new(r"(?i)\bQ:").unwrap(),
            answer: Regex::new(r"(?i)\bA:").unwrap(),
        }
    }

    pub fn long_markers() -> Self {
        Self {
            name: "question_answer_markers",
            question: Regex::new(r"(?i)\bQuestion:").unwrap(),
            answer: Regex::new(r"(?i)\bAnswer:").unwrap(),
        }
    }
}

impl QaMatcher for MarkerMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Vec<FlashcardDraft> {
        let starts: Vec<(usize, usize)> = self
            .question
            .find_iter(input.response)
            .map(|m| (m.start(), m.end()))
            .collect();

        starts
            .iter()
            .enumerate()
            .filter_map(|(i, &(_, body_start))| {
                let segment_end = starts
                    .get(i + 1)
                    .map(|&(next, _)| next)
                    .unwrap_or(input.response.len());
                let segment = &input.response[body_start..segment_end];
                let answer = self.answer.find(segment)?;
                refine_pair(&segment[..answer.start()], &segment[answer.end()..])
            })
            .collect()
    }
}

/// `1. Question? answer 2. Question? answer`.
pub struct NumberedQuestionMatcher;

impl QaMatcher for NumberedQuestionMatcher {
    fn name(&self) -> &'static str {
        "numbered_questions"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Vec<FlashcardDraft> {
        if !NUMBERED_ITEM.is_match(input.response) {
            return Vec::new();
        }

        NUMBERED_ITEM
            .split(input.response)
            .skip(1)
            .filter_map(|item| {
                let mark = item.find('?')?;
                refine_pair(&item[..=mark], &item[mark + 1..])
            })
            .collect()
    }
}

/// Any sentence ending in `?`, answered by the text up to the next question.
pub struct QuestionSentenceMatcher;

impl QaMatcher for QuestionSentenceMatcher {
    fn name(&self) -> &'static str {
        "question_sentences"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Vec<FlashcardDraft> {
        let questions: Vec<_> = QUESTION_SENTENCE.find_iter(input.response).collect();

        questions
            .iter()
            .enumerate()
            .filter_map(|(i, question)| {
                let answer_end = questions
                    .get(i + 1)
                    .map(|next| next.start())
                    .unwrap_or(input.response.len());
                refine_pair(question.as_str(), &input.response[question.end()..answer_end])
            })
            .collect()
    }
}

/// Last resort: turns sentences of the response, then of the content, into
/// "What is {term}?" cards.
pub struct SentenceSynthesisMatcher;

impl QaMatcher for SentenceSynthesisMatcher {
    fn name(&self) -> &'static str {
        "sentence_synthesis"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Vec<FlashcardDraft> {
        let from_response = split_sentences(input.response)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_RESPONSE_SENTENCE_CHARS);
        let from_content = split_sentences(input.content)
            .into_iter()
            .filter(|s| s.chars().count() > MIN_CONTENT_SENTENCE_CHARS);

        from_response
            .chain(from_content)
            .take(input.limit)
            .map(|sentence| {
                FlashcardDraft::new(format!("What is {}?", key_term(sentence)), sentence)
            })
            .collect()
    }
}

/// Ordered matchers; the first one producing any card wins.
pub struct ExtractionCascade {
    matchers: Vec<Box<dyn QaMatcher>>,
}

impl ExtractionCascade {
    pub fn new(matchers: Vec<Box<dyn QaMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MarkerMatcher::short_markers()),
            Box::new(MarkerMatcher::long_markers()),
            Box::new(NumberedQuestionMatcher),
            Box::new(QuestionSentenceMatcher),
            Box::new(SentenceSynthesisMatcher),
        ])
    }

    pub fn run(&self, response: &str, content: &str, limit: usize) -> Vec<FlashcardDraft> {
        let response = collapse_whitespace(response);
        let limit = limit.min(MAX_FLASHCARDS);
        let input = ExtractionInput {
            response: &response,
            content,
            limit,
        };

        for matcher in &self.matchers {
            let drafts = matcher.extract(&input);
            if drafts.is_empty() {
                continue;
            }
            tracing::debug!(matcher = matcher.name(), raw = drafts.len(), "Flashcards matched");
            let mut unique = dedup_by_question(drafts);
            unique.truncate(limit);
            return unique;
        }

        Vec::new()
    }
}

impl Default for ExtractionCascade {
    fn default() -> Self {
        Self::standard()
    }
}

/// Keeps the first card for every exact question string.
pub fn dedup_by_question(drafts: Vec<FlashcardDraft>) -> Vec<FlashcardDraft> {
    let mut seen = HashSet::new();
    drafts
        .into_iter()
        .filter(|draft| seen.insert(draft.question.clone()))
        .collect()
}

fn refine_pair(question: &str, answer: &str) -> Option<FlashcardDraft> {
    let question = LIST_NUMBER.replace(question.trim(), "");
    let question = BRACKETED.replace_all(&question, "");
    let question = collapse_whitespace(&question);

    let answer = LIST_NUMBER.replace(answer.trim(), "");
    let answer = BRACKETED.replace_all(&answer, "");
    let answer = PARENTHETICAL.replace_all(&answer, "");
    let answer = collapse_whitespace(&answer);

    let question = if question.ends_with('?') {
        question
    } else {
        format!("{}?", question)
    };

    if question.chars().count() <= MIN_SIDE_CHARS || answer.chars().count() <= MIN_SIDE_CHARS {
        return None;
    }
    Some(FlashcardDraft::new(question, answer))
}

/// First capitalized word longer than three characters outside the stoplist,
/// else the first longer-than-four word outside it (capitalized), else a
/// placeholder.
pub fn key_term(sentence: &str) -> String {
    let words: Vec<&str> = sentence
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();

    let is_stopword = |word: &str| STOPLIST.contains(&word.to_lowercase().as_str());

    if let Some(term) = words.iter().find(|w| {
        w.chars().next().is_some_and(char::is_uppercase) && w.chars().count() > 3 && !is_stopword(w)
    }) {
        return term.to_string();
    }

    if let Some(term) = words
        .iter()
        .find(|w| w.chars().count() > 4 && !is_stopword(w))
    {
        return capitalize(term);
    }

    PLACEHOLDER_TERM.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
