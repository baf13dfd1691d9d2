//! English word tables for the rule annotator
//!
//! Closed-class words are listed outright. Verbs are generated from their
//! base (and, for irregulars, past and participle) forms.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

/// Which inflections a surface form can realize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerbForms {
    pub base: bool,
    pub third_sing: bool,
    pub past: bool,
    pub past_part: bool,
    pub gerund: bool,
}

impl VerbForms {
    fn merge(&mut self, other: VerbForms) {
        self.base |= other.base;
        self.third_sing |= other.third_sing;
        self.past |= other.past;
        self.past_part |= other.past_part;
        self.gerund |= other.gerund;
    }

    /// Only realizable as a participle ("gone", "taken")
    pub fn participle_only(&self) -> bool {
        self.past_part && !self.past && !self.base
    }
}

/// Lemma plus the forms a surface word can realize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbEntry {
    pub lemma: String,
    pub forms: VerbForms,
}

// =============================================================================
// VERBS
// =============================================================================

/// (base, past, past participle)
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("go", "went", "gone"),
    ("get", "got", "gotten"),
    ("make", "made", "made"),
    ("take", "took", "taken"),
    ("come", "came", "come"),
    ("see", "saw", "seen"),
    ("know", "knew", "known"),
    ("think", "thought", "thought"),
    ("feel", "felt", "felt"),
    ("leave", "left", "left"),
    ("run", "ran", "run"),
    ("begin", "began", "begun"),
    ("give", "gave", "given"),
    ("find", "found", "found"),
    ("tell", "told", "told"),
    ("say", "said", "said"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("bring", "brought", "brought"),
    ("keep", "kept", "kept"),
    ("lose", "lost", "lost"),
    ("win", "won", "won"),
    ("eat", "ate", "eaten"),
    ("write", "wrote", "written"),
    ("read", "read", "read"),
    ("sleep", "slept", "slept"),
    ("wake", "woke", "woken"),
    ("quit", "quit", "quit"),
    ("put", "put", "put"),
    ("let", "let", "let"),
    ("sit", "sat", "sat"),
    ("stand", "stood", "stood"),
    ("meet", "met", "met"),
    ("pay", "paid", "paid"),
    ("spend", "spent", "spent"),
    ("teach", "taught", "taught"),
    ("fall", "fell", "fallen"),
    ("forget", "forgot", "forgotten"),
    ("grow", "grew", "grown"),
    ("drive", "drove", "driven"),
    ("fly", "flew", "flown"),
    ("swim", "swam", "swum"),
    ("become", "became", "become"),
    ("break", "broke", "broken"),
    ("choose", "chose", "chosen"),
    ("speak", "spoke", "spoken"),
    ("hear", "heard", "heard"),
    ("hold", "held", "held"),
    ("lead", "led", "led"),
    ("understand", "understood", "understood"),
    ("send", "sent", "sent"),
    ("show", "showed", "shown"),
    ("hurt", "hurt", "hurt"),
    ("set", "set", "set"),
    ("cut", "cut", "cut"),
    ("mean", "meant", "meant"),
    ("fight", "fought", "fought"),
    ("catch", "caught", "caught"),
    ("sell", "sold", "sold"),
    ("rise", "rose", "risen"),
    ("throw", "threw", "thrown"),
    ("wear", "wore", "worn"),
    ("draw", "drew", "drawn"),
    ("hide", "hid", "hidden"),
    ("shake", "shook", "shaken"),
    ("steal", "stole", "stolen"),
    ("ride", "rode", "ridden"),
    ("sing", "sang", "sung"),
    ("forgive", "forgave", "forgiven"),
];

const REGULAR_VERBS: &[&str] = &[
    "want", "try", "believe", "work", "start", "stop", "launch", "love", "hate", "like",
    "live", "move", "play", "exercise", "walk", "talk", "ask", "help", "finish", "change",
    "travel", "stay", "learn", "study", "wonder", "guess", "suppose", "assume", "consider",
    "hope", "wish", "plan", "attend", "happen", "fail", "matter", "succeed", "call", "use",
    "seem", "appear", "tend", "practice", "train", "jog", "cook", "clean", "watch", "listen",
    "open", "close", "care", "decide", "remember", "regret", "fear", "worry", "enjoy", "miss",
    "visit", "return", "push", "save", "carry", "apply", "hire", "join", "marry", "need",
    "look", "improve", "focus", "struggle", "manage", "create", "dream", "imagine", "realize",
    "notice", "expect", "intend", "promise", "commit", "continue", "pick", "reach", "achieve",
    "complete", "prepare", "relax", "rest", "smile", "cry", "laugh", "hug", "wait", "shop",
    "ship", "code", "design", "develop", "test", "deploy", "publish", "record", "post",
    "invest", "earn", "borrow", "own", "rent", "paint", "dance", "climb", "lift", "hike",
    "rush", "end", "handle", "follow", "check", "fix", "solve", "explore", "accept",
    "admit", "drop", "chat", "prefer", "pass", "share", "trust", "doubt",
    "arrive", "enter", "turn", "pull", "kill", "die", "lie", "graduate", "retire", "recover",
];

/// Doubled final consonant before -ed / -ing
const DOUBLING_VERBS: &[&str] = &[
    "stop", "plan", "jog", "ship", "shop", "commit", "regret", "hug", "drop", "chat", "prefer",
    "admit", "run", "swim", "sit", "get", "begin", "win", "forget", "put", "let", "set", "cut",
    "quit",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn ends_with_consonant_y(base: &str) -> bool {
    let chars: Vec<char> = base.chars().collect();
    chars.len() >= 2 && chars[chars.len() - 1] == 'y' && !is_vowel(chars[chars.len() - 2])
}

fn doubled(base: &str) -> String {
    match base.chars().last() {
        Some(last) if DOUBLING_VERBS.contains(&base) => format!("{}{}", base, last),
        _ => base.to_string(),
    }
}

fn third_singular(base: &str) -> String {
    if base == "have" {
        return "has".to_string();
    }
    if ends_with_consonant_y(base) {
        return format!("{}ies", &base[..base.len() - 1]);
    }
    if ["s", "sh", "ch", "x", "z", "o"].iter().any(|s| base.ends_with(s)) {
        return format!("{}es", base);
    }
    format!("{}s", base)
}

fn regular_past(base: &str) -> String {
    if base.ends_with('e') {
        return format!("{}d", base);
    }
    if ends_with_consonant_y(base) {
        return format!("{}ied", &base[..base.len() - 1]);
    }
    format!("{}ed", doubled(base))
}

fn gerund(base: &str) -> String {
    if base.ends_with("ie") {
        return format!("{}ying", &base[..base.len() - 2]);
    }
    if base.ends_with('e') && !base.ends_with("ee") && base.len() > 2 {
        return format!("{}ing", &base[..base.len() - 1]);
    }
    format!("{}ing", doubled(base))
}

fn insert(map: &mut HashMap<String, VerbEntry>, surface: String, lemma: &str, forms: VerbForms) {
    map.entry(surface)
        .and_modify(|e| e.forms.merge(forms))
        .or_insert_with(|| VerbEntry {
            lemma: lemma.to_string(),
            forms,
        });
}

fn build_verb_table() -> HashMap<String, VerbEntry> {
    let mut map = HashMap::new();
    let base = VerbForms { base: true, ..VerbForms::default() };
    let third = VerbForms { third_sing: true, ..VerbForms::default() };
    let past = VerbForms { past: true, ..VerbForms::default() };
    let part = VerbForms { past_part: true, ..VerbForms::default() };
    let ger = VerbForms { gerund: true, ..VerbForms::default() };

    for (b, p, pp) in IRREGULAR_VERBS {
        insert(&mut map, b.to_string(), b, base);
        insert(&mut map, third_singular(b), b, third);
        insert(&mut map, p.to_string(), b, past);
        insert(&mut map, pp.to_string(), b, part);
        insert(&mut map, gerund(b), b, ger);
    }
    for b in REGULAR_VERBS {
        insert(&mut map, b.to_string(), b, base);
        insert(&mut map, third_singular(b), b, third);
        let ed = regular_past(b);
        insert(&mut map, ed.clone(), b, past);
        insert(&mut map, ed, b, part);
        insert(&mut map, gerund(b), b, ger);
    }
    map
}

// =============================================================================
// CLOSED CLASSES
// =============================================================================

/// (word, lemma, fine tag)
const PRONOUNS: &[(&str, &str, &str)] = &[
    ("i", "i", "PRP"),
    ("me", "i", "PRP"),
    ("we", "we", "PRP"),
    ("us", "we", "PRP"),
    ("you", "you", "PRP"),
    ("he", "he", "PRP"),
    ("him", "he", "PRP"),
    ("she", "she", "PRP"),
    ("it", "it", "PRP"),
    ("they", "they", "PRP"),
    ("them", "they", "PRP"),
    ("myself", "myself", "PRP"),
    ("yourself", "yourself", "PRP"),
    ("himself", "himself", "PRP"),
    ("herself", "herself", "PRP"),
    ("itself", "itself", "PRP"),
    ("ourselves", "ourselves", "PRP"),
    ("themselves", "themselves", "PRP"),
    ("mine", "mine", "PRP"),
    ("yours", "yours", "PRP"),
    ("ours", "ours", "PRP"),
    ("theirs", "theirs", "PRP"),
    ("my", "my", "PRP$"),
    ("your", "your", "PRP$"),
    ("his", "his", "PRP$"),
    ("her", "her", "PRP$"),
    ("its", "its", "PRP$"),
    ("our", "our", "PRP$"),
    ("their", "their", "PRP$"),
    ("who", "who", "WP"),
    ("what", "what", "WP"),
    ("which", "which", "WDT"),
    ("something", "something", "NN"),
    ("nothing", "nothing", "NN"),
    ("everything", "everything", "NN"),
    ("anything", "anything", "NN"),
    ("someone", "someone", "NN"),
    ("somebody", "somebody", "NN"),
    ("everyone", "everyone", "NN"),
    ("everybody", "everybody", "NN"),
    ("nobody", "nobody", "NN"),
    ("anyone", "anyone", "NN"),
    ("anybody", "anybody", "NN"),
    ("there", "there", "EX"),
];

pub const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "these", "those", "every", "each", "some", "any", "no", "all",
    "another", "both", "either", "neither",
];

pub const ADPOSITIONS: &[&str] = &[
    "about", "of", "in", "on", "at", "to", "for", "with", "from", "into", "through", "over",
    "under", "after", "before", "during", "without", "since", "like", "by", "around", "across",
    "against", "between", "toward", "towards", "upon", "within", "near", "behind", "until",
    "onto", "off", "out", "up", "down",
];

pub const COORDINATORS: &[&str] = &["and", "but", "or", "nor"];

/// Subordinators that always mark a clause
pub const SUBORDINATORS: &[&str] = &[
    "if", "because", "when", "while", "although", "though", "unless", "whether", "whereas",
];

/// Prepositions that subordinate when a subject follows
pub const TEMPORAL_SUBORDINATORS: &[&str] = &["after", "before", "since", "until"];

pub const ADVERBS: &[&str] = &[
    "always", "usually", "often", "never", "rarely", "sometimes", "generally", "typically",
    "regularly", "maybe", "perhaps", "possibly", "probably", "definitely", "absolutely",
    "certainly", "really", "just", "still", "already", "now", "then", "lately", "recently",
    "suddenly", "finally", "later", "meanwhile", "again", "also", "too", "very", "so", "even",
    "ever", "here", "back", "away", "soon", "today", "tomorrow", "yesterday", "tonight",
    "earlier", "once", "mostly", "likely", "someday", "however", "instead", "daily",
    "together", "almost", "only", "quite", "yet", "anymore", "ago", "actually", "honestly",
    "seriously", "literally", "anyway", "otherwise", "first", "home", "more", "less", "much",
    "far", "hopefully", "eventually", "constantly", "frequently", "occasionally",
    "weekly", "nightly", "forever", "either",
];

pub const ADJECTIVES: &[&str] = &[
    "good", "bad", "great", "happy", "sad", "tough", "hard", "difficult", "easy", "new", "old",
    "big", "small", "early", "late", "sure", "certain", "afraid", "scared", "worried",
    "anxious", "nervous", "concerned", "stressed", "terrified", "frightened", "fearful",
    "upset", "proud", "excited", "grateful", "tired", "ready", "able", "honest", "important",
    "possible", "fine", "next", "last", "better", "worse", "best", "worst", "amazing",
    "wonderful", "terrible", "awful", "horrible", "perfect", "strong", "weak", "confident",
    "capable", "busy", "free", "different", "same", "whole", "real", "true", "false", "right",
    "wrong", "healthy", "sick", "lonely", "alone", "angry", "calm", "glad", "sorry", "ashamed",
    "guilty", "fit", "lazy", "stuck", "serious", "successful", "hopeful", "excellent",
    "much", "many", "few", "other", "own", "long", "short", "high", "low", "young", "overwhelmed",
    "motivated", "determined", "interested", "bored", "depressed", "miserable",
];

pub const INTERJECTIONS: &[&str] = &[
    "oh", "ah", "yeah", "yes", "wow", "hey", "um", "uh", "okay", "ok", "hmm",
];

pub const NUMBERS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand", "twenty", "thirty", "fifty",
];

/// Nouns read as adverbial time expressions
pub const TIME_NOUNS: &[&str] = &[
    "day", "week", "month", "year", "time", "morning", "night", "weekend", "evening",
    "afternoon", "days", "weeks", "months", "years", "times",
];

/// Verbs whose progressive frame reads as a parenthetical ("I've been thinking ...")
pub const PARENTHETICAL_VERBS: &[&str] = &["think", "wonder", "guess", "feel", "consider"];

/// Modal auxiliaries: (surface, lemma)
pub const MODALS: &[(&str, &str)] = &[
    ("will", "will"),
    ("would", "would"),
    ("shall", "shall"),
    ("should", "should"),
    ("can", "can"),
    ("could", "could"),
    ("may", "may"),
    ("might", "might"),
    ("must", "must"),
    ("'ll", "will"),
    ("wo", "will"),
    ("ca", "can"),
    ("ought", "ought"),
];

/// Forms of "be": (surface, fine tag)
pub const BE_FORMS: &[(&str, &str)] = &[
    ("am", "VBP"),
    ("are", "VBP"),
    ("is", "VBZ"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("'m", "VBP"),
    ("'re", "VBP"),
    ("ai", "VBP"),
];

lazy_static! {
    pub static ref VERBS: HashMap<String, VerbEntry> = build_verb_table();

    pub static ref PRONOUN_TABLE: HashMap<&'static str, (&'static str, &'static str)> =
        PRONOUNS.iter().map(|(w, l, t)| (*w, (*l, *t))).collect();

    pub static ref MODAL_TABLE: HashMap<&'static str, &'static str> =
        MODALS.iter().copied().collect();

    pub static ref BE_TABLE: HashMap<&'static str, &'static str> =
        BE_FORMS.iter().copied().collect();

    pub static ref DETERMINER_SET: HashSet<&'static str> = DETERMINERS.iter().copied().collect();
    pub static ref ADPOSITION_SET: HashSet<&'static str> = ADPOSITIONS.iter().copied().collect();
    pub static ref ADVERB_SET: HashSet<&'static str> = ADVERBS.iter().copied().collect();
    pub static ref ADJECTIVE_SET: HashSet<&'static str> = ADJECTIVES.iter().copied().collect();
}
