//! Annotation provider: the contract and a rule-based English implementation
//!
//! `RuleAnnotator` is deterministic and lexicon-driven. It tags tokens with
//! universal POS and Penn fine tags, then builds a shallow dependency tree with
//! ClearNLP labels: one predicate per verb group, auxiliaries as leaves, and
//! clause relations decided by markers ("to", "that", subordinators,
//! relative pronouns, coordinators) and subjects.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::lexicon::{
    VerbEntry, VerbForms, ADJECTIVE_SET, ADPOSITION_SET, ADVERB_SET, BE_TABLE, COORDINATORS,
    DETERMINER_SET, INTERJECTIONS, MODAL_TABLE, NUMBERS, PARENTHETICAL_VERBS, PRONOUN_TABLE,
    SUBORDINATORS, TEMPORAL_SUBORDINATORS, TIME_NOUNS, VERBS,
};
use crate::error::TasResult;
use crate::types::{Annotation, Pos, Token};

/// Linguistic annotation provider
pub trait Annotator: Send + Sync {
    /// Tokenize, tag and parse one sentence
    fn annotate(&self, sentence: &str) -> TasResult<Annotation>;

    /// Provider name for logs
    fn name(&self) -> &str {
        "custom"
    }

    /// Readiness check, run once when an analyzer is built
    fn check(&self) -> TasResult<()> {
        Ok(())
    }
}

lazy_static! {
    // =========================================================================
    // Tokens: words (hyphenated, with one clitic), numbers, lone clitics, symbols
    // =========================================================================
    static ref RE_TOKEN: Regex = Regex::new(
        r"[A-Za-z]+(?:-[A-Za-z]+)*(?:['’][A-Za-z]+)?|\d+(?:[.,:]\d+)*|['’][A-Za-z]+|\S"
    ).unwrap();
}

const CLITICS: &[&str] = &["'s", "'m", "'re", "'ve", "'ll", "'d"];

/// Subject-form personal pronouns
const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

/// Rule-based English annotator
#[derive(Debug, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, sentence: &str) -> TasResult<Annotation> {
        let raw = tokenize(sentence);
        let mut drafts: Vec<Draft> = Vec::with_capacity(raw.len());
        for (i, (text, idx)) in raw.into_iter().enumerate() {
            let initial = drafts.iter().all(|d: &Draft| d.pos == Pos::PUNCT) || i == 0;
            drafts.push(Draft::lexical(text, idx, initial));
        }
        resolve(&mut drafts);
        let (heads, deps) = parse(&drafts);

        let tokens = drafts
            .into_iter()
            .zip(heads.into_iter().zip(deps))
            .map(|(d, (head, dep))| Token {
                morph: morph_for(&d),
                text: d.text,
                lemma: d.lemma,
                pos: d.pos,
                tag: d.tag.to_string(),
                dep: dep.to_string(),
                head,
                idx: d.idx,
            })
            .collect();
        Ok(Annotation::new(tokens))
    }

    fn name(&self) -> &str {
        "rule-en"
    }
}

// =============================================================================
// TOKENIZER
// =============================================================================

fn normalize(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

fn byte_at(word: &str, char_pos: usize) -> usize {
    word.char_indices()
        .nth(char_pos)
        .map(|(b, _)| b)
        .unwrap_or(word.len())
}

/// Split "can't" → ca + n't, "I've" → I + 've
fn split_clitics(word: &str) -> Vec<(&str, usize)> {
    let norm = normalize(word);
    let len = word.chars().count();
    if len > 3 && norm.ends_with("n't") {
        let cut = byte_at(word, len - 3);
        return vec![(&word[..cut], 0), (&word[cut..], len - 3)];
    }
    if let Some(pos) = word.chars().position(|c| c == '\'' || c == '’') {
        let cut = byte_at(word, pos);
        if pos > 0 && CLITICS.contains(&normalize(&word[cut..]).as_str()) {
            return vec![(&word[..cut], 0), (&word[cut..], pos)];
        }
    }
    vec![(word, 0)]
}

/// Surface tokens with char offsets
fn tokenize(sentence: &str) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    for m in RE_TOKEN.find_iter(sentence) {
        let start = sentence[..m.start()].chars().count();
        for (piece, offset) in split_clitics(m.as_str()) {
            out.push((piece.to_string(), start + offset));
        }
    }
    out
}

// =============================================================================
// TAGGER
// =============================================================================

#[derive(Debug, Clone)]
struct Draft {
    text: String,
    lower: String,
    lemma: String,
    pos: Pos,
    tag: &'static str,
    idx: usize,
    verb: Option<VerbEntry>,
}

impl Draft {
    fn set(&mut self, pos: Pos, tag: &'static str, lemma: &str) {
        self.pos = pos;
        self.tag = tag;
        self.lemma = lemma.to_string();
    }

    fn is_neg(&self) -> bool {
        self.pos == Pos::PART && self.lemma == "not"
    }

    fn is_to(&self) -> bool {
        self.pos == Pos::PART && self.tag == "TO"
    }

    fn is_nominal(&self) -> bool {
        matches!(self.pos, Pos::NOUN | Pos::PROPN)
            || (self.pos == Pos::PRON && self.tag != "PRP$")
    }

    fn is_subject_pronoun(&self) -> bool {
        self.pos == Pos::PRON && SUBJECT_PRONOUNS.contains(&self.lower.as_str())
    }

    fn is_participle(&self) -> bool {
        self.lower == "been"
            || (self.pos == Pos::VERB && self.verb.as_ref().is_some_and(|v| v.forms.past_part))
    }

    /// Lexical reading, before context
    fn lexical(text: String, idx: usize, sentence_initial: bool) -> Self {
        let lower = normalize(&text);
        let mut d = Draft {
            lemma: lower.clone(),
            lower,
            text,
            pos: Pos::X,
            tag: "XX",
            idx,
            verb: None,
        };
        let w = d.lower.clone();
        let w = w.as_str();

        if !w.chars().any(char::is_alphanumeric) {
            let tag = match w {
                "." | "!" | "?" => ".",
                "," => ",",
                _ => ":",
            };
            d.set(Pos::PUNCT, tag, w);
        } else if w.chars().all(|c| c.is_ascii_digit() || ".,:".contains(c)) || NUMBERS.contains(&w) {
            d.set(Pos::NUM, "CD", w);
        } else if w == "n't" || w == "not" {
            d.set(Pos::PART, "RB", "not");
        } else if w == "'s" {
            d.set(Pos::AUX, "VBZ", "be");
        } else if w == "'d" {
            d.set(Pos::AUX, "MD", "would");
        } else if let Some(tag) = have_tag(w) {
            d.set(Pos::AUX, tag, "have");
        } else if let Some(tag) = do_tag(w) {
            d.set(Pos::AUX, tag, "do");
        } else if let Some(&tag) = BE_TABLE.get(w) {
            d.set(Pos::AUX, tag, "be");
        } else if let Some(&lemma) = MODAL_TABLE.get(w) {
            d.set(Pos::AUX, "MD", lemma);
        } else if let Some(&(lemma, tag)) = PRONOUN_TABLE.get(w) {
            d.set(Pos::PRON, tag, lemma);
        } else if w == "that" {
            d.set(Pos::DET, "DT", "that");
        } else if w == "to" {
            d.set(Pos::ADP, "IN", "to");
        } else if DETERMINER_SET.contains(w) {
            d.set(Pos::DET, "DT", w);
        } else if SUBORDINATORS.contains(&w) {
            d.set(Pos::SCONJ, "IN", w);
        } else if COORDINATORS.contains(&w) {
            d.set(Pos::CCONJ, "CC", w);
        } else if INTERJECTIONS.contains(&w) {
            d.set(Pos::INTJ, "UH", w);
        } else if ADJECTIVE_SET.contains(w) {
            let tag = match w {
                "better" | "worse" => "JJR",
                "best" | "worst" => "JJS",
                _ => "JJ",
            };
            d.set(Pos::ADJ, tag, w);
        } else if ADVERB_SET.contains(w) {
            d.set(Pos::ADV, "RB", w);
        } else if ADPOSITION_SET.contains(w) {
            d.set(Pos::ADP, "IN", w);
        } else if let Some(entry) = VERBS.get(w) {
            d.set(Pos::VERB, "VB", &entry.lemma);
            d.verb = Some(entry.clone());
        } else {
            d.guess_open_class(sentence_initial);
        }
        d
    }

    /// Suffix heuristics for words outside the lexicon
    fn guess_open_class(&mut self, sentence_initial: bool) {
        let w = self.lower.clone();
        let n = w.len();
        if w.ends_with("ing") && n > 5 {
            self.set(Pos::VERB, "VBG", &w[..n - 3]);
            self.verb = Some(VerbEntry {
                lemma: w[..n - 3].to_string(),
                forms: VerbForms { gerund: true, ..VerbForms::default() },
            });
        } else if w.ends_with("ed") && n > 4 {
            self.set(Pos::VERB, "VBD", &w[..n - 2]);
            self.verb = Some(VerbEntry {
                lemma: w[..n - 2].to_string(),
                forms: VerbForms { past: true, past_part: true, ..VerbForms::default() },
            });
        } else if w.ends_with("ly") && n > 4 {
            self.set(Pos::ADV, "RB", &w);
        } else if ["ful", "ous", "ive", "able", "ible", "less"].iter().any(|s| w.ends_with(s)) {
            self.set(Pos::ADJ, "JJ", &w);
        } else if self.text.chars().next().is_some_and(char::is_uppercase) && !sentence_initial {
            let text = self.text.clone();
            self.set(Pos::PROPN, "NNP", &text);
        } else if w.ends_with('s') && !w.ends_with("ss") && n > 3 {
            self.set(Pos::NOUN, "NNS", &w[..n - 1]);
        } else {
            self.set(Pos::NOUN, "NN", &w);
        }
    }
}

fn have_tag(w: &str) -> Option<&'static str> {
    match w {
        "have" | "'ve" => Some("VBP"),
        "has" => Some("VBZ"),
        "had" => Some("VBD"),
        _ => None,
    }
}

fn do_tag(w: &str) -> Option<&'static str> {
    match w {
        "do" => Some("VBP"),
        "does" => Some("VBZ"),
        "did" => Some("VBD"),
        _ => None,
    }
}

/// Nearest index after `i`, skipping adverbs and negation
fn next_content(d: &[Draft], i: usize) -> Option<usize> {
    (i + 1..d.len()).find(|&j| d[j].pos != Pos::ADV && !d[j].is_neg())
}

/// Nearest index before `i`, skipping adverbs and negation
fn prev_content(d: &[Draft], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| d[j].pos != Pos::ADV && !d[j].is_neg())
}

/// Contextual disambiguation, left to right
fn resolve(d: &mut [Draft]) {
    pretag_approximators(d);
    for i in 0..d.len() {
        let lower = d[i].lower.clone();
        match lower.as_str() {
            "that" => resolve_that(d, i),
            "to" => resolve_to(d, i),
            "like" => resolve_like(d, i),
            "her" => resolve_her(d, i),
            "have" | "has" | "had" | "'ve" => resolve_have(d, i),
            "do" | "does" | "did" => resolve_do(d, i),
            "'s" => resolve_s(d, i),
            "'d" => resolve_d(d, i),
            w if TEMPORAL_SUBORDINATORS.contains(&w) => resolve_temporal(d, i),
            _ => {}
        }
        if d[i].pos == Pos::VERB {
            resolve_verb(d, i);
        }
    }
}

/// "kind of" / "sort of" before a verb are adverbial
fn pretag_approximators(d: &mut [Draft]) {
    for i in 0..d.len().saturating_sub(2) {
        if !matches!(d[i].lower.as_str(), "kind" | "sort") || d[i + 1].lower != "of" {
            continue;
        }
        let verb_follows = (i + 2..d.len())
            .find(|&j| d[j].pos != Pos::ADV)
            .is_some_and(|j| d[j].verb.is_some());
        if verb_follows {
            let (first, second) = (d[i].lower.clone(), d[i + 1].lower.clone());
            d[i].set(Pos::ADV, "RB", &first);
            d[i + 1].set(Pos::ADV, "RB", &second);
        }
    }
}

fn resolve_that(d: &mut [Draft], i: usize) {
    let prev = i.checked_sub(1).map(|p| d[p].pos);
    let next = d.get(i + 1).map(|n| n.pos);
    if matches!(prev, Some(Pos::NOUN) | Some(Pos::PROPN)) {
        d[i].set(Pos::PRON, "WDT", "that");
    } else if matches!(prev, Some(Pos::VERB) | Some(Pos::ADJ)) && !matches!(next, None | Some(Pos::PUNCT)) {
        d[i].set(Pos::SCONJ, "IN", "that");
    } else if matches!(next, Some(Pos::NOUN) | Some(Pos::ADJ) | Some(Pos::PROPN)) {
        d[i].set(Pos::DET, "DT", "that");
    } else {
        d[i].set(Pos::PRON, "DT", "that");
    }
}

fn resolve_to(d: &mut [Draft], i: usize) {
    let infinitive = next_content(d, i).is_some_and(|j| {
        d[j].verb.as_ref().is_some_and(|v| v.forms.base)
            || matches!(d[j].lower.as_str(), "be" | "have" | "do")
    });
    if infinitive {
        d[i].set(Pos::PART, "TO", "to");
    }
}

fn resolve_like(d: &mut [Draft], i: usize) {
    let verbal = prev_content(d, i).is_some_and(|j| d[j].is_subject_pronoun() || d[j].pos == Pos::AUX);
    if verbal {
        if let Some(entry) = VERBS.get("like") {
            d[i].set(Pos::VERB, "VB", "like");
            d[i].verb = Some(entry.clone());
        }
    }
}

fn resolve_her(d: &mut [Draft], i: usize) {
    let possessive = d
        .get(i + 1)
        .is_some_and(|n| matches!(n.pos, Pos::NOUN | Pos::ADJ | Pos::PROPN) || n.verb.is_some());
    if !possessive {
        d[i].set(Pos::PRON, "PRP", "she");
    }
}

fn resolve_have(d: &mut [Draft], i: usize) {
    let auxiliary = next_content(d, i).is_some_and(|j| d[j].is_participle());
    if auxiliary {
        if prev_content(d, i).is_some_and(|j| d[j].tag == "MD") {
            d[i].tag = "VB";
        }
        return;
    }
    let forms = match d[i].lower.as_str() {
        "has" => VerbForms { third_sing: true, ..VerbForms::default() },
        "had" => VerbForms { past: true, past_part: true, ..VerbForms::default() },
        _ => VerbForms { base: true, ..VerbForms::default() },
    };
    d[i].set(Pos::VERB, "VB", "have");
    d[i].verb = Some(VerbEntry { lemma: "have".to_string(), forms });
}

fn resolve_do(d: &mut [Draft], i: usize) {
    let negated = d.get(i + 1).is_some_and(Draft::is_neg);
    let auxiliary = negated
        || next_content(d, i).is_some_and(|j| {
            d[j].is_subject_pronoun() || d[j].verb.as_ref().is_some_and(|v| v.forms.base)
        });
    if auxiliary {
        return;
    }
    let forms = match d[i].lower.as_str() {
        "does" => VerbForms { third_sing: true, ..VerbForms::default() },
        "did" => VerbForms { past: true, ..VerbForms::default() },
        _ => VerbForms { base: true, ..VerbForms::default() },
    };
    d[i].set(Pos::VERB, "VB", "do");
    d[i].verb = Some(VerbEntry { lemma: "do".to_string(), forms });
}

fn resolve_s(d: &mut [Draft], i: usize) {
    let after_pronoun = i
        .checked_sub(1)
        .is_some_and(|p| d[p].pos == Pos::PRON || matches!(d[p].lower.as_str(), "here" | "there"));
    if !after_pronoun {
        d[i].set(Pos::PART, "POS", "'s");
        return;
    }
    let perfect = next_content(d, i).is_some_and(|j| {
        d[j].lower == "been"
            || d[j].lower == "got"
            || d[j].verb.as_ref().is_some_and(|v| v.forms.participle_only())
    });
    if perfect {
        d[i].lemma = "have".to_string();
    }
}

fn resolve_d(d: &mut [Draft], i: usize) {
    let perfect = next_content(d, i).is_some_and(|j| {
        d[j].lower == "been" || d[j].verb.as_ref().is_some_and(|v| v.forms.participle_only())
    });
    if perfect {
        d[i].set(Pos::AUX, "VBD", "have");
    }
}

fn resolve_temporal(d: &mut [Draft], i: usize) {
    if d.get(i + 1).is_some_and(Draft::is_subject_pronoun) {
        let w = d[i].lower.clone();
        d[i].set(Pos::SCONJ, "IN", &w);
    }
}

/// Noun/verb split and the fine tag of a verb
fn resolve_verb(d: &mut [Draft], i: usize) {
    let Some(entry) = d[i].verb.clone() else {
        return;
    };
    let f = entry.forms;
    let gerund = f.gerund && d[i].lower.ends_with("ing");

    let nominal_context = i.checked_sub(1).is_some_and(|p| {
        let prev = &d[p];
        matches!(prev.pos, Pos::DET | Pos::ADJ | Pos::NUM)
            || (prev.pos == Pos::PRON && prev.tag == "PRP$")
            || (prev.pos == Pos::PART && prev.tag == "POS")
            || (prev.pos == Pos::ADP && !gerund)
    });
    if nominal_context {
        let (tag, lemma) = if f.third_sing && !f.base {
            ("NNS", entry.lemma.clone())
        } else {
            ("NN", d[i].lower.clone())
        };
        d[i].set(Pos::NOUN, tag, &lemma);
        d[i].verb = None;
        return;
    }

    let pc = prev_content(d, i).map(|j| &d[j]);
    let after_aux = |lemma: &str| pc.is_some_and(|p| p.pos == Pos::AUX && p.lemma == lemma);
    let after_infinitive_marker = pc.is_some_and(|p| {
        p.is_to() || (p.pos == Pos::AUX && (p.tag == "MD" || p.lemma == "do"))
    });
    let has_subject_before = (0..i).any(|j| d[j].is_nominal());

    let tag = if gerund {
        "VBG"
    } else if (after_aux("have") || after_aux("be")) && f.past_part {
        "VBN"
    } else if after_infinitive_marker && f.base {
        "VB"
    } else if f.past {
        "VBD"
    } else if f.third_sing {
        "VBZ"
    } else if f.base {
        if has_subject_before {
            "VBP"
        } else {
            "VB"
        }
    } else if f.past_part {
        "VBN"
    } else {
        "VB"
    };
    d[i].tag = tag;
}

// =============================================================================
// PARSER
// =============================================================================

/// One predicate and the token span it governs
#[derive(Debug, Clone)]
struct Clause {
    pred: usize,
    start: usize,
    end: usize,
    subject: Option<usize>,
    marker: Option<usize>,
    coordinator: Option<usize>,
    relative: Option<usize>,
    infinitival: bool,
    after_adposition: Option<usize>,
}

impl Clause {
    fn is_unmarked(&self) -> bool {
        self.marker.is_none()
            && !self.infinitival
            && self.relative.is_none()
            && self.after_adposition.is_none()
    }
}

/// Auxiliary attachments: aux index → head index
fn attach_auxiliaries(d: &[Draft]) -> Vec<Option<usize>> {
    let n = d.len();
    let mut aux_of = vec![None; n];
    let skippable = |t: &Draft| t.pos == Pos::AUX || t.pos == Pos::ADV || t.is_neg();

    for i in 0..n {
        if d[i].pos != Pos::AUX {
            continue;
        }
        let mut j = i + 1;
        let mut last_aux = i;
        while j < n && skippable(&d[j]) {
            if d[j].pos == Pos::AUX {
                last_aux = j;
            }
            j += 1;
        }
        if j < n && d[j].pos == Pos::VERB {
            aux_of[i] = Some(j);
        } else if last_aux != i {
            aux_of[i] = Some(last_aux);
        }
    }
    for i in 0..n {
        if !d[i].is_to() {
            continue;
        }
        let j = (i + 1..n).find(|&j| d[j].pos != Pos::ADV && !d[j].is_neg());
        if let Some(j) = j {
            if d[j].pos == Pos::VERB {
                aux_of[i] = Some(j);
            } else if d[j].pos == Pos::AUX {
                aux_of[i] = Some(aux_of[j].unwrap_or(j));
            }
        }
    }
    aux_of
}

fn is_clause_marker(t: &Draft) -> bool {
    matches!(t.pos, Pos::ADV | Pos::SCONJ | Pos::CCONJ)
        || (t.pos == Pos::PUNCT && matches!(t.lower.as_str(), "," | ";" | "-" | "—"))
        || (t.pos == Pos::PRON && matches!(t.tag, "WDT" | "WP"))
}

/// Walk left from the verb group: adverbs, subject phrase, then markers
fn clause_start(d: &[Draft], lower: usize, first: usize, infinitival: bool) -> (usize, Option<usize>) {
    let mut s = first;
    while s > lower && (d[s - 1].pos == Pos::ADV || d[s - 1].is_neg()) {
        s -= 1;
    }
    let mut subject = None;
    if !infinitival && s > lower && d[s - 1].is_nominal() {
        s -= 1;
        subject = Some(s);
        if matches!(d[s].pos, Pos::NOUN | Pos::PROPN) {
            while s > lower
                && (matches!(d[s - 1].pos, Pos::DET | Pos::ADJ | Pos::NUM | Pos::NOUN | Pos::PROPN)
                    || d[s - 1].tag == "PRP$")
            {
                s -= 1;
            }
        }
    }
    while s > lower && is_clause_marker(&d[s - 1]) {
        s -= 1;
    }
    (s, subject)
}

fn build_clauses(d: &[Draft], preds: &[usize], aux_of: &[Option<usize>]) -> Vec<Clause> {
    let mut clauses: Vec<Clause> = Vec::with_capacity(preds.len());
    for (k, &p) in preds.iter().enumerate() {
        let lower = if k == 0 { 0 } else { preds[k - 1] + 1 };
        let first = (lower..p).find(|&i| aux_of[i] == Some(p)).unwrap_or(p);
        let infinitival = (lower..p).any(|i| aux_of[i] == Some(p) && d[i].is_to());
        let (start, subject) = clause_start(d, lower, first, infinitival);
        let start = if k == 0 { 0 } else { start };

        let span = start..first;
        let marker = span.clone().find(|&i| d[i].pos == Pos::SCONJ);
        let coordinator = span.clone().find(|&i| d[i].pos == Pos::CCONJ);
        let relative = span
            .clone()
            .find(|&i| d[i].pos == Pos::PRON && matches!(d[i].lemma.as_str(), "who" | "which" | "that") && d[i].tag != "DT");
        let after_adposition = (start > 0 && k > 0 && d[start - 1].pos == Pos::ADP).then(|| start - 1);

        if let Some(prev) = clauses.last_mut() {
            prev.end = start;
        }
        clauses.push(Clause {
            pred: p,
            start,
            end: d.len(),
            subject,
            marker,
            coordinator,
            relative,
            infinitival,
            after_adposition,
        });
    }
    clauses
}

fn is_progressive_cognition(d: &[Draft], pred: usize, aux_of: &[Option<usize>]) -> bool {
    PARENTHETICAL_VERBS.contains(&d[pred].lemma.as_str())
        && d[pred].tag == "VBG"
        && (0..pred).any(|i| aux_of[i] == Some(pred) && d[i].lemma == "be")
}

/// Heads and dependency labels for every token
fn parse(d: &[Draft]) -> (Vec<usize>, Vec<&'static str>) {
    let n = d.len();
    let mut heads: Vec<usize> = (0..n).collect();
    let mut deps: Vec<&'static str> = vec!["dep"; n];
    if n == 0 {
        return (heads, deps);
    }

    let aux_of = attach_auxiliaries(d);
    let preds: Vec<usize> = (0..n)
        .filter(|&i| d[i].pos == Pos::VERB || (d[i].pos == Pos::AUX && aux_of[i].is_none()))
        .collect();

    if preds.is_empty() {
        return parse_fragment(d);
    }

    let clauses = build_clauses(d, &preds, &aux_of);
    let root_k = clauses.iter().position(Clause::is_unmarked).unwrap_or(0);
    let mut root = clauses[root_k].pred;
    heads[root] = root;
    deps[root] = "ROOT";

    // Clause relations
    for (k, c) in clauses.iter().enumerate() {
        if k == root_k {
            continue;
        }
        let prev = if k > 0 { clauses[k - 1].pred } else { root };
        let (dep, head) = if let Some(adp) = c.after_adposition {
            ("pcomp", adp)
        } else if c.infinitival {
            if c.pred < root {
                ("advcl", root)
            } else {
                ("xcomp", prev)
            }
        } else if let Some(rel) = c.relative {
            let noun = (0..rel).rev().find(|&j| d[j].is_nominal()).unwrap_or(prev);
            ("relcl", noun)
        } else if let Some(m) = c.marker {
            if matches!(d[m].lemma.as_str(), "that" | "whether") && c.pred > root {
                ("ccomp", prev)
            } else {
                ("advcl", root)
            }
        } else if c.coordinator.is_some() {
            ("conj", root)
        } else if c.subject.is_some() {
            ("ccomp", prev)
        } else {
            ("xcomp", prev)
        };
        heads[c.pred] = head;
        deps[c.pred] = dep;
    }

    // "I've been thinking maybe I'll ..." reads as a parenthetical frame
    if let Some(next) = clauses.get(root_k + 1) {
        if is_progressive_cognition(d, root, &aux_of)
            && deps[next.pred] == "ccomp"
            && heads[next.pred] == root
            && next.marker.is_none()
            && next.subject.is_some()
        {
            let demoted = root;
            root = next.pred;
            heads[root] = root;
            deps[root] = "ROOT";
            heads[demoted] = root;
            deps[demoted] = "parataxis";
            for c in &clauses {
                if c.pred != root && heads[c.pred] == demoted && matches!(deps[c.pred], "advcl" | "conj") {
                    heads[c.pred] = root;
                }
            }
        }
    }

    // Auxiliaries are leaves of their verb
    let passive = |h: usize| d[h].tag == "VBN" && d[h].pos == Pos::VERB;
    for i in 0..n {
        if let Some(h) = aux_of[i] {
            heads[i] = h;
            deps[i] = if d[i].lemma == "be" && passive(h) { "auxpass" } else { "aux" };
        }
    }

    // Tokens inside each clause
    let is_pred = |i: usize| preds.contains(&i);
    for c in &clauses {
        let mut has_object = false;
        for i in c.start..c.end {
            if i == c.pred || is_pred(i) || aux_of[i].is_some() {
                continue;
            }
            let (dep, head) = clause_token(d, c, i, root, &heads, &deps, &mut has_object);
            heads[i] = head;
            deps[i] = dep;
        }
    }
    (heads, deps)
}

/// Label one non-predicate token of a clause
fn clause_token(
    d: &[Draft],
    c: &Clause,
    i: usize,
    root: usize,
    heads: &[usize],
    deps: &[&'static str],
    has_object: &mut bool,
) -> (&'static str, usize) {
    let p = c.pred;
    let t = &d[i];
    let next_nominal = || {
        (i + 1..c.end)
            .find(|&j| !matches!(d[j].pos, Pos::ADJ | Pos::ADV | Pos::NUM | Pos::DET))
            .filter(|&j| matches!(d[j].pos, Pos::NOUN | Pos::PROPN | Pos::PRON))
    };

    if t.pos == Pos::PUNCT {
        return ("punct", root);
    }
    if t.is_neg() {
        return ("neg", p);
    }
    if Some(i) == c.subject {
        let passive = d[p].tag == "VBN" && (c.start..p).any(|j| d[j].lemma == "be" && d[j].pos == Pos::AUX);
        return (if passive { "nsubjpass" } else { "nsubj" }, p);
    }
    match t.pos {
        Pos::SCONJ => return ("mark", p),
        Pos::CCONJ => {
            let head = if deps[p] == "conj" { heads[p] } else { p };
            return ("cc", head);
        }
        Pos::ADV => return ("advmod", p),
        Pos::INTJ => return ("intj", p),
        Pos::ADP => {
            if t.lower == "of" && i > c.start && matches!(d[i - 1].pos, Pos::NOUN | Pos::PRON) {
                return ("prep", i - 1);
            }
            return ("prep", p);
        }
        Pos::PART if t.tag == "POS" => return ("case", i.saturating_sub(1)),
        Pos::PART => return ("prt", p),
        Pos::DET => {
            if let Some(m) = next_nominal() {
                return ("det", m);
            }
        }
        Pos::PRON if t.tag == "PRP$" => {
            if let Some(m) = next_nominal() {
                return ("poss", m);
            }
        }
        Pos::PRON if c.relative == Some(i) => return ("dobj", p),
        Pos::ADJ => {
            let next = (i + 1..c.end).find(|&j| d[j].pos != Pos::ADV);
            if let Some(j) = next.filter(|&j| matches!(d[j].pos, Pos::NOUN | Pos::PROPN)) {
                return ("amod", j);
            }
            return ("acomp", p);
        }
        Pos::NUM => {
            if let Some(j) = (i + 1 < c.end).then_some(i + 1).filter(|&j| d[j].pos == Pos::NOUN) {
                return ("nummod", j);
            }
        }
        Pos::NOUN | Pos::PROPN => {
            if i + 1 < c.end && matches!(d[i + 1].pos, Pos::NOUN | Pos::PROPN) {
                return ("compound", i + 1);
            }
        }
        _ => {}
    }

    // Nominal: object of a preposition, of the verb, or an adverbial
    let governor = (c.start..i)
        .rev()
        .find(|&j| !(matches!(d[j].pos, Pos::DET | Pos::ADJ | Pos::NUM | Pos::ADV) || d[j].tag == "PRP$"));
    if let Some(j) = governor.filter(|&j| d[j].pos == Pos::ADP) {
        return ("pobj", j);
    }
    if TIME_NOUNS.contains(&t.lower.as_str()) {
        return ("npadvmod", p);
    }
    if i < p {
        return ("dep", p);
    }
    if d[p].pos == Pos::AUX {
        return ("attr", p);
    }
    if !*has_object {
        *has_object = true;
        return ("dobj", p);
    }
    ("dep", p)
}

/// Verbless input: the first content word heads everything
fn parse_fragment(d: &[Draft]) -> (Vec<usize>, Vec<&'static str>) {
    let n = d.len();
    let root = (0..n)
        .find(|&i| matches!(d[i].pos, Pos::NOUN | Pos::PROPN | Pos::PRON | Pos::ADJ))
        .or_else(|| (0..n).find(|&i| d[i].pos != Pos::PUNCT))
        .unwrap_or(0);
    let mut heads = vec![root; n];
    let mut deps = vec!["dep"; n];
    deps[root] = "ROOT";
    for i in 0..n {
        if i == root {
            continue;
        }
        deps[i] = match d[i].pos {
            Pos::PUNCT => "punct",
            Pos::DET => "det",
            Pos::ADJ => "amod",
            Pos::ADV => "advmod",
            Pos::ADP => "prep",
            Pos::INTJ => "intj",
            _ => "dep",
        };
    }
    heads[root] = root;
    (heads, deps)
}

// =============================================================================
// MORPHOLOGY
// =============================================================================

fn morph_for(d: &Draft) -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    let mut put = |k: &str, v: &str| {
        m.insert(k.to_string(), v.to_string());
    };
    if d.pos.is_verbal() {
        match d.tag {
            "VBP" | "VBZ" => {
                put("Tense", "Pres");
                put("VerbForm", "Fin");
            }
            "VBD" => {
                put("Tense", "Past");
                put("VerbForm", "Fin");
            }
            "VBN" => {
                put("Aspect", "Perf");
                put("Tense", "Past");
                put("VerbForm", "Part");
            }
            "VBG" => {
                put("Aspect", "Prog");
                put("Tense", "Pres");
                put("VerbForm", "Part");
            }
            "VB" => put("VerbForm", "Inf"),
            "MD" => put("VerbForm", "Fin"),
            _ => {}
        }
    } else if d.pos == Pos::PRON && d.tag == "PRP" {
        match d.lower.as_str() {
            "i" => {
                put("Case", "Nom");
                put("Number", "Sing");
                put("Person", "1");
            }
            "me" => {
                put("Case", "Acc");
                put("Number", "Sing");
                put("Person", "1");
            }
            "we" => {
                put("Case", "Nom");
                put("Number", "Plur");
                put("Person", "1");
            }
            "us" => {
                put("Case", "Acc");
                put("Number", "Plur");
                put("Person", "1");
            }
            _ => {}
        }
    } else if d.pos == Pos::NOUN {
        put("Number", if d.tag == "NNS" { "Plur" } else { "Sing" });
    }
    m
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(s: &str) -> Annotation {
        RuleAnnotator::new().annotate(s).unwrap()
    }

    fn find<'a>(ann: &'a Annotation, text: &str) -> &'a Token {
        ann.tokens.iter().find(|t| t.text == text).unwrap()
    }

    #[test]
    fn test_tokenizer_splits_contractions() {
        let texts: Vec<String> = tokenize("I can't, I won't, I've tried.")
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            texts,
            vec!["I", "ca", "n't", ",", "I", "wo", "n't", ",", "I", "'ve", "tried", "."]
        );
    }

    #[test]
    fn test_offsets_are_char_based() {
        let toks = tokenize("I’ll go");
        assert_eq!(toks[0], ("I".to_string(), 0));
        assert_eq!(toks[1], ("’ll".to_string(), 1));
        assert_eq!(toks[2], ("go".to_string(), 5));
    }

    #[test]
    fn test_used_to_is_past_root() {
        let ann = annotate("I used to run every day");
        let root = ann.verbal_root().unwrap();
        assert_eq!(root.lemma, "use");
        assert_eq!(root.tense(), Some("Past"));
        let run = find(&ann, "run");
        assert_eq!(run.dep, "xcomp");
        assert_eq!(find(&ann, "to").dep, "aux");
    }

    #[test]
    fn test_progressive_cognition_frame_is_parenthetical() {
        let ann = annotate("lately I've been thinking maybe I'll get back into it.");
        let root = ann.verbal_root().unwrap();
        assert_eq!(root.lemma, "get");
        assert_eq!(root.tag, "VB");
        assert_eq!(root.tense(), None);
        let thinking = find(&ann, "thinking");
        assert_eq!(thinking.dep, "parataxis");
        assert_eq!(find(&ann, "'ll").dep, "aux");
        assert_eq!(find(&ann, "'ll").lemma, "will");
    }

    #[test]
    fn test_copular_complement() {
        let ann = annotate("I think pizza is good");
        let think = find(&ann, "think");
        assert_eq!(think.dep, "ROOT");
        let is = find(&ann, "is");
        assert_eq!(is.pos, Pos::AUX);
        assert_eq!(is.dep, "ccomp");
        assert_eq!(find(&ann, "pizza").dep, "nsubj");
    }

    #[test]
    fn test_modal_attaches_to_verb() {
        let ann = annotate("I might kind of want to try it");
        let might = find(&ann, "might");
        assert_eq!(might.dep, "aux");
        assert_eq!(ann.tokens[might.head].text, "want");
        assert_eq!(find(&ann, "kind").pos, Pos::ADV);
    }

    #[test]
    fn test_perfect_auxiliary() {
        let ann = annotate("I should have left earlier");
        let left = find(&ann, "left");
        assert_eq!(left.tag, "VBN");
        assert_eq!(left.dep, "ROOT");
        assert_eq!(find(&ann, "have").pos, Pos::AUX);
    }

    #[test]
    fn test_prepositional_think() {
        let ann = annotate("I think about life");
        let about = find(&ann, "about");
        assert_eq!(about.dep, "prep");
        assert_eq!(ann.tokens[about.head].text, "think");
        assert_eq!(find(&ann, "life").dep, "pobj");
    }

    #[test]
    fn test_conditional_clause_is_advcl() {
        let ann = annotate("If I could, I would travel");
        assert_eq!(ann.verbal_root().unwrap().text, "travel");
        assert_eq!(find(&ann, "could").dep, "advcl");
    }

    #[test]
    fn test_verbless_fragment() {
        let ann = annotate("Pizza!");
        assert!(ann.verbal_root().is_none());
        assert_eq!(ann.tokens[0].dep, "ROOT");
    }

    #[test]
    fn test_empty_sentence() {
        assert!(annotate("").is_empty());
    }
}
