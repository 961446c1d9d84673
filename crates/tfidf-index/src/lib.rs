//! TF-IDF vector space over a fixed document collection, answering
//! nearest-neighbour queries by cosine similarity.
//!
//! The index is fitted once from pre-tokenized documents:
//!
//! 1. Every distinct term is interned into a [`Vocabulary`]; its [`TermId`]
//!    is the term's column.
//! 2. Each term gets a smoothed inverse document frequency,
//!    `ln((1 + n) / (1 + df)) + 1`.
//! 3. Each document becomes a sparse row of raw term counts times IDF,
//!    L2-normalized. Row `i` always corresponds to document `i`.
//!
//! Queries are projected with the same vocabulary and IDF weights. Terms the
//! index has never seen contribute nothing. There is no way to add terms or
//! documents after fitting.
//!
//! Tokenization is the caller's business; this crate only sees term slices.

use std::collections::BTreeMap;

use term_vocab::{TermId, Vocabulary};

/// A sparse, L2-normalized weight vector. Entries are sorted by [`TermId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    /// Build from (term, weight) pairs sorted by term, normalizing to unit
    /// length. An all-zero input stays all-zero.
    fn normalized(entries: Vec<(TermId, f64)>) -> Self {
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector { entries };
        }
        SparseVector {
            entries: entries.into_iter().map(|(t, w)| (t, w / norm)).collect(),
        }
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Best-scoring row for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatch {
    /// Row (document) index.
    pub index: usize,
    /// Cosine similarity in `0.0..=1.0`.
    pub score: f64,
}

impl SimilarityMatch {
    /// Acceptance rule: strictly greater than `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.score > threshold
    }
}

/// A fitted TF-IDF index.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    vocabulary: Vocabulary,
    /// IDF weight per column, indexed by `TermId`.
    idf: Vec<f64>,
    /// One row per fitted document.
    rows: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Fit the index over `documents`, each given as its term sequence.
    pub fn fit<D, T>(documents: &[D]) -> Self
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::new();
        let mut doc_counts: Vec<BTreeMap<TermId, u32>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut counts = BTreeMap::new();
            for term in doc.as_ref() {
                let id = vocabulary.intern(term.as_ref());
                *counts.entry(id).or_insert(0) += 1;
            }
            doc_counts.push(counts);
        }

        let mut df = vec![0u32; vocabulary.len()];
        for counts in &doc_counts {
            for id in counts.keys() {
                df[id.as_usize()] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = doc_counts
            .into_iter()
            .map(|counts| {
                let weighted = counts
                    .into_iter()
                    .map(|(id, tf)| (id, tf as f64 * idf[id.as_usize()]))
                    .collect();
                SparseVector::normalized(weighted)
            })
            .collect();

        TfIdfIndex {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Project query terms into the fitted space. Unknown terms are dropped.
    pub fn vectorize<T: AsRef<str>>(&self, terms: &[T]) -> SparseVector {
        let mut counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in terms {
            if let Some(id) = self.vocabulary.find(term.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let weighted = counts
            .into_iter()
            .map(|(id, tf)| (id, tf as f64 * self.idf[id.as_usize()]))
            .collect();
        SparseVector::normalized(weighted)
    }

    /// Cosine similarity of the query against every row, in row order.
    pub fn scores<T: AsRef<str>>(&self, terms: &[T]) -> Vec<f64> {
        let query = self.vectorize(terms);
        self.rows.iter().map(|row| row.dot(&query)).collect()
    }

    /// Arg-max over [`scores`](Self::scores). Equal maxima resolve to the
    /// lowest row index. Returns `None` only when the index has no rows.
    pub fn query<T: AsRef<str>>(&self, terms: &[T]) -> Option<SimilarityMatch> {
        let scores = self.scores(terms);
        let mut best: Option<SimilarityMatch> = None;
        for (index, &score) in scores.iter().enumerate() {
            match best {
                Some(b) if score <= b.score => {}
                _ => best = Some(SimilarityMatch { index, score }),
            }
        }
        best
    }

    /// [`query`](Self::query) filtered by the acceptance rule.
    pub fn best_above<T: AsRef<str>>(
        &self,
        terms: &[T],
        threshold: f64,
    ) -> Option<SimilarityMatch> {
        self.query(terms).filter(|m| m.exceeds(threshold))
    }

    /// IDF weight for a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.find(term).map(|id| self.idf[id.as_usize()])
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of fitted documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
