use async_trait::async_trait;
use tracing::debug;

use super::lexicon::{self, contains};
use super::{NlpPipeline, ParsedSentence, Token};

/// Rule-based Spanish pipeline: whitespace/punctuation tokenizer, lexicon and
/// suffix tagger, and a heuristic attacher emitting Universal Dependencies
/// relations. Deterministic and dependency-free, so the service can run
/// without the parsing sidecar.
#[derive(Debug, Clone, Default)]
pub struct BuiltinPipeline;

impl BuiltinPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, sentence: &str) -> ParsedSentence {
        let pieces = tokenize(sentence);
        let lower: Vec<String> = pieces.iter().map(|p| p.text.to_lowercase()).collect();
        let tags = tag(&pieces, &lower);
        let arcs = Attacher::new(&lower, &tags).attach();

        let tokens = pieces
            .into_iter()
            .zip(tags)
            .zip(arcs)
            .map(|((piece, pos), (head, dep))| Token {
                text: piece.text,
                pos: pos.to_string(),
                dep: dep.to_string(),
                head,
                whitespace: piece.whitespace,
            })
            .collect::<Vec<_>>();

        debug!("Built-in pipeline produced {} tokens", tokens.len());
        ParsedSentence::new(tokens)
    }
}

#[async_trait]
impl NlpPipeline for BuiltinPipeline {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn parse(&self, sentence: &str) -> Result<ParsedSentence, anyhow::Error> {
        Ok(self.analyze(sentence))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Piece {
    text: String,
    whitespace: bool,
}

fn tokenize(sentence: &str) -> Vec<Piece> {
    let trailing_space = sentence.ends_with(char::is_whitespace);
    let chunks: Vec<&str> = sentence.split_whitespace().collect();
    let mut pieces = Vec::new();

    for (n, chunk) in chunks.iter().enumerate() {
        let parts = split_chunk(chunk);
        let last = parts.len().saturating_sub(1);
        let spaced = n + 1 < chunks.len() || trailing_space;
        for (i, text) in parts.into_iter().enumerate() {
            pieces.push(Piece {
                text,
                whitespace: i == last && spaced,
            });
        }
    }

    pieces
}

fn is_detachable(c: char) -> bool {
    lexicon::is_punctuation_char(c) || lexicon::is_symbol_char(c)
}

/// Peel leading and trailing punctuation off a whitespace-delimited chunk.
/// Runs of the same mark ("...", "!!") stay together.
fn split_chunk(chunk: &str) -> Vec<String> {
    let chars: Vec<char> = chunk.chars().collect();
    let (mut start, mut end) = (0, chars.len());

    let mut parts = Vec::new();
    while start < end && is_detachable(chars[start]) {
        let c = chars[start];
        let run = chars[start..end].iter().take_while(|&&x| x == c).count();
        parts.push(chars[start..start + run].iter().collect::<String>());
        start += run;
    }

    let mut trailing = Vec::new();
    while end > start && is_detachable(chars[end - 1]) {
        let c = chars[end - 1];
        let run = chars[start..end].iter().rev().take_while(|&&x| x == c).count();
        trailing.push(chars[end - run..end].iter().collect::<String>());
        end -= run;
    }

    if start < end {
        parts.push(chars[start..end].iter().collect());
    }
    parts.extend(trailing.into_iter().rev());
    parts
}

fn is_closed_class(word: &str) -> bool {
    [
        lexicon::DETERMINERS,
        lexicon::ADPOSITIONS,
        lexicon::COORD_CONJUNCTIONS,
        lexicon::SUBORD_CONJUNCTIONS,
        lexicon::PRONOUNS,
        lexicon::AUXILIARIES,
        lexicon::ADVERBS,
    ]
    .iter()
    .any(|list| contains(list, word))
}

fn tag(pieces: &[Piece], lower: &[String]) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::with_capacity(pieces.len());
    let mut clause_has_verb = false;

    for (i, piece) in pieces.iter().enumerate() {
        let context = TagContext {
            index: i,
            prev: tags.last().copied(),
            next: lower.get(i + 1).map(String::as_str),
            clause_has_verb,
        };
        let tag = tag_word(&piece.text, &lower[i], &context);
        match tag {
            "VERB" | "AUX" => clause_has_verb = true,
            // "pan y queso" stays in the same clause, "come y bebe" starts a new one
            "CCONJ" => {
                clause_has_verb =
                    clause_has_verb && matches!(context.prev, Some("NOUN" | "PROPN" | "PRON" | "NUM"))
            }
            "SCONJ" => clause_has_verb = false,
            "PUNCT" if matches!(lower[i].as_str(), "," | ";" | ":") => clause_has_verb = false,
            _ => {}
        }
        tags.push(tag);
    }

    tags
}

struct TagContext<'a> {
    index: usize,
    prev: Option<&'static str>,
    next: Option<&'a str>,
    clause_has_verb: bool,
}

fn tag_word(text: &str, lower: &str, cx: &TagContext<'_>) -> &'static str {
    if text.chars().all(lexicon::is_punctuation_char) {
        return "PUNCT";
    }
    if text.chars().all(lexicon::is_symbol_char) {
        return "SYM";
    }
    if lexicon::is_numeric(lower) || contains(lexicon::NUMERALS, lower) {
        return "NUM";
    }

    // "la", "lo" after a subject or negation and before a verb are object clitics
    if contains(lexicon::CLITIC_ARTICLES, lower)
        && matches!(cx.prev, Some("NOUN" | "PROPN" | "PRON" | "ADV"))
        && cx.next.map_or(false, |n| lexicon::looks_finite(n) && !is_closed_class(n))
    {
        return "PRON";
    }

    if contains(lexicon::AUXILIARIES, lower) {
        return "AUX";
    }
    if contains(lexicon::DETERMINERS, lower) {
        return "DET";
    }
    if contains(lexicon::ADPOSITIONS, lower) {
        return "ADP";
    }
    if contains(lexicon::COORD_CONJUNCTIONS, lower) {
        return "CCONJ";
    }
    if contains(lexicon::SUBORD_CONJUNCTIONS, lower) {
        return "SCONJ";
    }
    if contains(lexicon::PRONOUNS, lower) {
        return "PRON";
    }
    if contains(lexicon::ADVERBS, lower) {
        return "ADV";
    }

    let capitalized = text.chars().next().map_or(false, char::is_uppercase);
    if capitalized && cx.index > 0 {
        return "PROPN";
    }
    // Sentence-initial capital: a name unless followed by something a verb would govern
    if capitalized
        && cx.next.map_or(false, |n| {
            !contains(lexicon::DETERMINERS, n)
                && !contains(lexicon::ADPOSITIONS, n)
                && !contains(lexicon::CLITICS, n)
                && !matches!(n, "." | "!" | "?" | "...")
        })
        && !lexicon::is_infinitive(lower)
        && !lexicon::is_gerund(lower)
        && !contains(lexicon::ADJECTIVES, lower)
        && !contains(lexicon::NOUNS, lower)
    {
        return "PROPN";
    }

    if lower.ends_with("mente") && lower.chars().count() > 6 {
        return "ADV";
    }
    if contains(lexicon::ADJECTIVES, lower) {
        return "ADJ";
    }
    if contains(lexicon::NOUNS, lower) {
        return "NOUN";
    }
    if matches!(cx.prev, Some("DET" | "NUM")) {
        return "NOUN";
    }
    if lexicon::is_infinitive(lower) || lexicon::is_gerund(lower) {
        return "VERB";
    }
    if lexicon::is_participle(lower) {
        return if cx.prev == Some("AUX") { "VERB" } else { "ADJ" };
    }
    if cx.prev == Some("ADP") {
        return "NOUN";
    }
    if matches!(cx.prev, Some("NOUN" | "PROPN")) && lexicon::has_adjective_suffix(lower) {
        return "ADJ";
    }
    if !cx.clause_has_verb && lexicon::looks_finite(lower) {
        return "VERB";
    }
    "NOUN"
}

#[derive(Debug, Clone, Copy)]
struct Phrase {
    start: usize,
    end: usize,
    head: usize,
}

/// Assigns a head and relation to every token.
struct Attacher<'a> {
    lower: &'a [String],
    tags: &'a [&'static str],
    heads: Vec<Option<usize>>,
    deps: Vec<&'static str>,
    predicate: Vec<bool>,
}

impl<'a> Attacher<'a> {
    fn new(lower: &'a [String], tags: &'a [&'static str]) -> Self {
        let n = tags.len();
        Self {
            lower,
            tags,
            heads: vec![None; n],
            deps: vec!["dep"; n],
            predicate: vec![false; n],
        }
    }

    fn len(&self) -> usize {
        self.tags.len()
    }

    fn set(&mut self, token: usize, head: usize, dep: &'static str) {
        self.heads[token] = Some(head);
        self.deps[token] = dep;
    }

    fn is_clitic(&self, i: usize) -> bool {
        self.tags[i] == "PRON"
            && contains(lexicon::CLITICS, &self.lower[i])
            && self
                .tags
                .get(i + 1)
                .map_or(false, |t| matches!(*t, "VERB" | "AUX"))
    }

    fn attach(mut self) -> Vec<(usize, &'static str)> {
        let n = self.len();
        if n == 0 {
            return Vec::new();
        }

        self.mark_predicates();
        let preds: Vec<usize> = (0..n).filter(|&i| self.predicate[i]).collect();
        let phrases = self.chunk_phrases();

        let root = preds
            .first()
            .copied()
            .or_else(|| phrases.first().map(|p| p.head))
            .or_else(|| (0..n).find(|&i| self.tags[i] != "PUNCT"))
            .unwrap_or(0);
        self.set(root, root, "ROOT");

        self.attach_predicates(&preds, root);
        self.attach_phrases(&phrases, &preds, root);
        self.attach_remaining(&phrases, &preds, root);

        self.heads
            .iter()
            .zip(self.deps.iter())
            .map(|(head, dep)| (head.unwrap_or(root), *dep))
            .collect()
    }

    /// Verbs are predicates; auxiliaries attach to the verb or nominal they support.
    fn mark_predicates(&mut self) {
        let n = self.len();
        for i in 0..n {
            match self.tags[i] {
                "VERB" => self.predicate[i] = true,
                "AUX" => {
                    let next = (i + 1..n).find(|&j| {
                        !(self.tags[j] == "ADV" || (self.tags[j] == "PRON" && self.is_clitic(j)))
                    });
                    match next {
                        Some(j) if self.tags[j] == "VERB" => self.set(i, j, "aux"),
                        Some(_) if !contains(lexicon::PERFECT_AUXILIARIES, &self.lower[i]) => {
                            match self.copula_complement(i) {
                                Some(k) => {
                                    self.predicate[k] = true;
                                    self.set(i, k, "cop");
                                }
                                None => self.predicate[i] = true,
                            }
                        }
                        _ => self.predicate[i] = true,
                    }
                }
                _ => {}
            }
        }
    }

    /// The nominal or adjective a copula links to: a noun wins over the adjectives before it.
    fn copula_complement(&self, aux: usize) -> Option<usize> {
        let mut first_adj = None;
        for j in aux + 1..self.len() {
            match self.tags[j] {
                "DET" | "NUM" | "ADV" => {}
                "ADJ" => {
                    first_adj.get_or_insert(j);
                }
                "NOUN" | "PROPN" => return Some(j),
                "PRON" if !self.is_clitic(j) => return Some(j),
                _ => break,
            }
        }
        first_adj
    }

    /// Noun phrases: optional DET/NUM/ADJ run, a nominal head, flat names, trailing adjectives.
    fn chunk_phrases(&self) -> Vec<Phrase> {
        let n = self.len();
        let mut phrases = Vec::new();
        let mut i = 0;

        while i < n {
            let start = i;
            let mut j = i;
            while j < n && matches!(self.tags[j], "DET" | "NUM" | "ADJ") {
                j += 1;
            }

            let nominal = j < n
                && (matches!(self.tags[j], "NOUN" | "PROPN")
                    || (self.tags[j] == "PRON" && !self.is_clitic(j)));
            if nominal {
                let head = j;
                let mut end = j;
                while self.tags[head] == "PROPN" && end + 1 < n && self.tags[end + 1] == "PROPN" {
                    end += 1;
                }
                while end + 1 < n && self.tags[end + 1] == "ADJ" && !self.predicate[end + 1] {
                    end += 1;
                }
                phrases.push(Phrase { start, end, head });
                i = end + 1;
            } else if j > start && self.tags[j - 1] == "NUM" {
                phrases.push(Phrase { start, end: j - 1, head: j - 1 });
                i = j;
            } else if j > start {
                i = j;
            } else {
                i += 1;
            }
        }

        phrases
    }

    fn attach_predicates(&mut self, preds: &[usize], root: usize) {
        for pair in preds.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let between = prev + 1..cur;

            if between.clone().any(|k| self.tags[k] == "CCONJ") {
                self.set(cur, root, "conj");
            } else if let Some(k) = between.clone().find(|&k| self.tags[k] == "SCONJ") {
                let dep = if self.lower[k] == "que" { "ccomp" } else { "advcl" };
                self.set(cur, prev, dep);
            } else if self.tags[cur] == "VERB" && lexicon::is_infinitive(&self.lower[cur]) {
                self.set(cur, prev, "xcomp");
            } else {
                self.set(cur, root, "conj");
            }
        }
    }

    fn governor(&self, token: usize, preds: &[usize], root: usize) -> usize {
        preds
            .iter()
            .rev()
            .find(|&&p| p < token)
            .or_else(|| preds.iter().find(|&&p| p > token))
            .copied()
            .unwrap_or(root)
    }

    fn attach_phrases(&mut self, phrases: &[Phrase], preds: &[usize], root: usize) {
        for (idx, phrase) in phrases.iter().enumerate() {
            let head = phrase.head;

            for k in phrase.start..=phrase.end {
                if k == head || k == root || self.predicate[k] {
                    continue;
                }
                let dep = match self.tags[k] {
                    "DET" => "det",
                    "NUM" => "nummod",
                    "ADJ" => "amod",
                    "PROPN" => "flat",
                    _ => "dep",
                };
                self.set(k, head, dep);
            }

            if head == root || self.predicate[head] {
                continue;
            }

            let prev = idx.checked_sub(1).map(|p| phrases[p]);
            let before = phrase.start.checked_sub(1);

            match before.map(|b| (b, self.tags[b])) {
                Some((b, "ADP")) => {
                    self.set(b, head, "case");
                    let genitive = matches!(self.lower[b].as_str(), "de" | "del");
                    match prev.filter(|p| genitive && p.end + 1 == b) {
                        Some(p) => self.set(head, p.head, "nmod"),
                        None => {
                            let gov = self.governor(head, preds, root);
                            self.set(head, gov, "obl");
                        }
                    }
                }
                Some((b, "CCONJ")) if prev.map_or(false, |p| p.end + 1 == b) => {
                    if let Some(p) = prev {
                        self.set(head, p.head, "conj");
                    }
                }
                Some((b, "PUNCT")) if self.lower[b] == "," && prev.map_or(false, |p| p.end + 1 == b) => {
                    if let Some(p) = prev {
                        self.set(head, p.head, "appos");
                    }
                }
                _ => self.attach_core_argument(phrase, preds, root),
            }
        }
    }

    /// Subject if it precedes its predicate, object if it follows one.
    fn attach_core_argument(&mut self, phrase: &Phrase, preds: &[usize], root: usize) {
        let head = phrase.head;
        let left = preds.iter().rev().find(|&&p| p < head).copied();
        let right = preds.iter().find(|&&p| p > head).copied();

        match (left, right) {
            (Some(l), Some(r)) if self.starts_new_clause(l, phrase, r) => self.set(head, r, "nsubj"),
            (Some(l), _) => self.set(head, l, "obj"),
            (None, Some(r)) => self.set(head, r, "nsubj"),
            (None, None) => self.set(head, root, "dep"),
        }
    }

    fn starts_new_clause(&self, left: usize, phrase: &Phrase, right: usize) -> bool {
        let break_before = (left + 1..phrase.start)
            .any(|k| matches!(self.tags[k], "CCONJ" | "SCONJ") || self.lower[k] == ",");
        let adjacent_after = (phrase.end + 1..right)
            .all(|k| matches!(self.tags[k], "ADV" | "PRON" | "AUX"));
        break_before && adjacent_after
    }

    fn attach_remaining(&mut self, phrases: &[Phrase], preds: &[usize], root: usize) {
        let n = self.len();
        let next_pred = |i: usize| preds.iter().find(|&&p| p > i).copied();
        let next_phrase = |i: usize| phrases.iter().find(|p| p.head > i).map(|p| p.head);

        for i in 0..n {
            if self.heads[i].is_some() {
                continue;
            }

            let (head, dep) = match self.tags[i] {
                "PUNCT" => (root, "punct"),
                "ADP" => match self.tags.get(i + 1) {
                    Some(&"VERB") => (i + 1, "mark"),
                    _ => next_phrase(i).map_or((root, "dep"), |h| (h, "case")),
                },
                "SCONJ" => (next_pred(i).unwrap_or(root), "mark"),
                "CCONJ" => {
                    let target = (i + 1..n).find(|&j| {
                        self.predicate[j] || (phrases.iter().any(|p| p.head == j) && self.deps[j] == "conj")
                    });
                    (target.or_else(|| next_pred(i)).unwrap_or(root), "cc")
                }
                "ADV" => match self.tags.get(i + 1) {
                    Some(&"ADJ") | Some(&"ADV") => (i + 1, "advmod"),
                    _ if self.lower[i] == "no" => (next_pred(i).unwrap_or(root), "advmod"),
                    _ => (self.governor(i, preds, root), "advmod"),
                },
                "PRON" => (next_pred(i).unwrap_or(root), "obj"),
                "DET" => {
                    let target = (i + 1..n).find(|&j| matches!(self.tags[j], "ADJ" | "NOUN"));
                    (target.unwrap_or(root), "det")
                }
                "ADJ" => {
                    let target = phrases.iter().rev().find(|p| p.head < i).map(|p| p.head);
                    (target.unwrap_or(root), "amod")
                }
                _ => (root, "dep"),
            };

            let head = if head == i { root } else { head };
            self.set(i, head, dep);
        }
    }
}
