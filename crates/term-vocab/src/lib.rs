//! Interning vocabulary mapping terms to compact [`TermId`] column indices.
//!
//! The vocabulary maintains two parallel structures:
//! - `terms`: terms in first-seen order (index = TermId)
//! - `sorted_index`: TermIds sorted by their term, for O(log n) lookup
//!
//! A vector space uses `TermId` as the column of a term. Once the owning index
//! is fitted, only [`Vocabulary::find`] is reachable, so the fitted vocabulary
//! stays frozen.

/// Column identifier assigned to a term by a [`Vocabulary`].
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TermId(pub u32);

impl TermId {
    /// Create a TermId from a usize index. Panics if index > u32::MAX.
    #[inline]
    pub fn from_usize(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "TermId overflow: {index}");
        TermId(index as u32)
    }

    /// Convert to usize for indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// An interning vocabulary that maps terms to sequential [`TermId`] values.
///
/// Lookup is O(log n) via binary search over a sorted index.
/// Insertion is O(n) in the worst case (due to index shifting).
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Terms in first-seen order. `terms[id.as_usize()]` is the term for `id`.
    terms: Vec<String>,
    /// Indices into `terms`, kept sorted by the term they reference.
    sorted_index: Vec<TermId>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term if not already present, returning its ID.
    ///
    /// If the term already exists, returns the existing ID without duplicating.
    pub fn intern(&mut self, term: &str) -> TermId {
        let search_result = self
            .sorted_index
            .binary_search_by(|&id| self.terms[id.as_usize()].as_str().cmp(term));

        match search_result {
            Ok(idx) => self.sorted_index[idx],
            Err(insert_pos) => {
                let new_id = TermId::from_usize(self.terms.len());
                self.terms.push(term.to_string());
                self.sorted_index.insert(insert_pos, new_id);
                new_id
            }
        }
    }

    /// Look up a term without inserting. Returns `None` if absent.
    pub fn find(&self, term: &str) -> Option<TermId> {
        self.sorted_index
            .binary_search_by(|&id| self.terms[id.as_usize()].as_str().cmp(term))
            .ok()
            .map(|idx| self.sorted_index[idx])
    }

    /// Number of distinct terms.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
