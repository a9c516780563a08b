//! Typed records for the role-labeling dataset.
//!
//! A [`DatasetBundle`] is the 4-tuple `(train, valid, test, dicts)`. Each
//! [`Split`] holds three parallel families of [`Sequence`]s: word ids,
//! table-slot ids and label ids, one entry per token. The field order of
//! every record is the on-disk order, so the bincode payload reads as
//! nested tuples.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// One sentence's per-token ids.
pub type Sequence = Vec<i32>;

/// Ordered string-to-id lookup. Ordered so encoding is deterministic.
pub type Index = BTreeMap<String, i32>;

/// Table ids are label ids shifted into their own range by this amount.
pub const TABLE_OFFSET: i32 = 170;

/// Vocabulary sentinel for out-of-vocabulary words.
pub const UNK: &str = "<UNK>";

/// Table sentinel standing in for the outside label.
pub const NOTABLE: &str = "<NOTABLE>";

/// The outside label. It has no table slot of its own.
pub const OUTSIDE: &str = "O";

/// Which partition a [`Split`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitKind {
    Train,
    Valid,
    Test,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Train => "train",
            Self::Valid => "valid",
            Self::Test => "test",
        })
    }
}

/// One partition of the dataset: three parallel sequence families.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Split {
    pub words: Vec<Sequence>,
    pub tables: Vec<Sequence>,
    pub labels: Vec<Sequence>,
}

impl Split {
    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of tokens across all sentences.
    pub fn token_count(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }

    /// Label names of sentence `i`, resolved through `dicts`.
    ///
    /// Returns `None` if the sentence does not exist or holds an id that
    /// `labels2idx` does not know.
    pub fn decode_labels<'d>(&self, i: usize, dicts: &'d Dictionaries) -> Option<Vec<&'d str>> {
        self.labels
            .get(i)?
            .iter()
            .map(|&id| dicts.label_name(id))
            .collect()
    }

    fn check_shape(&self, kind: SplitKind) -> DatasetResult<()> {
        if self.tables.len() != self.words.len() || self.labels.len() != self.words.len() {
            return Err(DatasetError::Integrity {
                rule: "shape",
                detail: format!(
                    "{kind}: {} word, {} table and {} label sequences",
                    self.words.len(),
                    self.tables.len(),
                    self.labels.len()
                ),
            });
        }
        for (i, ((w, t), l)) in self
            .words
            .iter()
            .zip(&self.tables)
            .zip(&self.labels)
            .enumerate()
        {
            if w.len() != t.len() || w.len() != l.len() {
                return Err(DatasetError::Integrity {
                    rule: "shape",
                    detail: format!(
                        "{kind} sentence {i}: lengths words={} tables={} labels={}",
                        w.len(),
                        t.len(),
                        l.len()
                    ),
                });
            }
        }
        Ok(())
    }

    fn check_domain(&self, kind: SplitKind, dicts: &Dictionaries) -> DatasetResult<()> {
        let families = [
            ("words", &self.words, &dicts.words2idx),
            ("tables", &self.tables, &dicts.tables2idx),
            ("labels", &self.labels, &dicts.labels2idx),
        ];
        for (family, sequences, index) in families {
            let known: BTreeSet<i32> = index.values().copied().collect();
            for (i, seq) in sequences.iter().enumerate() {
                let unknown = seq.iter().enumerate().find(|&(_, id)| !known.contains(id));
                if let Some((j, id)) = unknown {
                    return Err(DatasetError::Integrity {
                        rule: "id-domain",
                        detail: format!(
                            "{kind} sentence {i} {family}[{j}] = {id} is not in the index"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_table_alignment(&self, kind: SplitKind) -> DatasetResult<()> {
        for (i, (t, l)) in self.tables.iter().zip(&self.labels).enumerate() {
            let misaligned = (0..t.len()).find(|&j| l[j].checked_add(TABLE_OFFSET) != Some(t[j]));
            if let Some(j) = misaligned {
                return Err(DatasetError::Integrity {
                    rule: "table-alignment",
                    detail: format!(
                        "{kind} sentence {i} token {j}: table {} != label {} + {TABLE_OFFSET}",
                        t[j], l[j]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The three lookup dictionaries shipped with the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dictionaries {
    pub labels2idx: Index,
    pub tables2idx: Index,
    pub words2idx: Index,
}

impl Dictionaries {
    /// Id of `word`, falling back to the `<UNK>` id for unknown words.
    pub fn word_id(&self, word: &str) -> Option<i32> {
        self.words2idx
            .get(word)
            .or_else(|| self.words2idx.get(UNK))
            .copied()
    }

    pub fn label_id(&self, label: &str) -> Option<i32> {
        self.labels2idx.get(label).copied()
    }

    /// Table slot of `label`. The outside label maps to `<NOTABLE>`.
    pub fn table_id(&self, label: &str) -> Option<i32> {
        let key = if label == OUTSIDE { NOTABLE } else { label };
        self.tables2idx.get(key).copied()
    }

    pub fn label_name(&self, id: i32) -> Option<&str> {
        reverse(&self.labels2idx, id)
    }

    pub fn word(&self, id: i32) -> Option<&str> {
        reverse(&self.words2idx, id)
    }

    fn check_injective(&self) -> DatasetResult<()> {
        let indexes = [
            ("labels2idx", &self.labels2idx),
            ("tables2idx", &self.tables2idx),
            ("words2idx", &self.words2idx),
        ];
        for (name, index) in indexes {
            let mut seen: BTreeMap<i32, &str> = BTreeMap::new();
            for (key, &id) in index {
                if let Some(prev) = seen.insert(id, key) {
                    return Err(DatasetError::Integrity {
                        rule: "injective",
                        detail: format!("{name}: \"{prev}\" and \"{key}\" both map to {id}"),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_sentinels(&self) -> DatasetResult<()> {
        match self.words2idx.get(UNK) {
            Some(0) => Ok(()),
            other => Err(DatasetError::Integrity {
                rule: "unk-sentinel",
                detail: format!("words2idx[\"{UNK}\"] is {other:?}, expected Some(0)"),
            }),
        }
    }

    fn check_table_offset(&self) -> DatasetResult<()> {
        let violation = |detail: String| DatasetError::Integrity {
            rule: "table-offset",
            detail,
        };

        if self.tables2idx.contains_key(OUTSIDE) {
            return Err(violation(format!(
                "tables2idx has \"{OUTSIDE}\"; it must be keyed as \"{NOTABLE}\""
            )));
        }
        if self.tables2idx.len() != self.labels2idx.len() {
            return Err(violation(format!(
                "tables2idx has {} keys, labels2idx has {}",
                self.tables2idx.len(),
                self.labels2idx.len()
            )));
        }
        for (label, &id) in &self.labels2idx {
            let Some(expected) = id.checked_add(TABLE_OFFSET) else {
                return Err(violation(format!(
                    "label \"{label}\" ({id}) has no table slot: {id} + {TABLE_OFFSET} overflows"
                )));
            };
            match self.table_id(label) {
                Some(t) if t == expected => {}
                other => {
                    return Err(violation(format!(
                        "label \"{label}\" ({id}) has table {other:?}, expected {expected}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn reverse(index: &Index, id: i32) -> Option<&str> {
    index
        .iter()
        .find_map(|(key, &v)| (v == id).then_some(key.as_str()))
}

/// The whole dataset: `(train, valid, test, dicts)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetBundle {
    pub train: Split,
    pub valid: Split,
    pub test: Split,
    pub dicts: Dictionaries,
}

impl DatasetBundle {
    /// Splits paired with their kind, in serialization order.
    pub fn splits(&self) -> [(SplitKind, &Split); 3] {
        [
            (SplitKind::Train, &self.train),
            (SplitKind::Valid, &self.valid),
            (SplitKind::Test, &self.test),
        ]
    }

    pub fn split(&self, kind: SplitKind) -> &Split {
        match kind {
            SplitKind::Train => &self.train,
            SplitKind::Valid => &self.valid,
            SplitKind::Test => &self.test,
        }
    }

    /// Check every dataset invariant, reporting the first violation.
    ///
    /// Sentences shared between `train` and the other splits are allowed.
    pub fn validate(&self) -> DatasetResult<()> {
        self.dicts.check_injective()?;
        self.dicts.check_sentinels()?;
        self.dicts.check_table_offset()?;
        for (kind, split) in self.splits() {
            split.check_shape(kind)?;
            split.check_domain(kind, &self.dicts)?;
            split.check_table_alignment(kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(pairs: &[(&str, i32)]) -> Index {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    fn tiny() -> DatasetBundle {
        let dicts = Dictionaries {
            labels2idx: index(&[("B-supertype", 0), ("O", 1)]),
            tables2idx: index(&[("B-supertype", 170), ("<NOTABLE>", 171)]),
            words2idx: index(&[("<UNK>", 0), ("hawk", 1), ("tree", 2)]),
        };
        let split = Split {
            words: vec![vec![1, 2, 0]],
            tables: vec![vec![170, 171, 171]],
            labels: vec![vec![0, 1, 1]],
        };
        DatasetBundle {
            train: split.clone(),
            valid: split.clone(),
            test: split,
            dicts,
        }
    }

    fn rule_of(result: DatasetResult<()>) -> &'static str {
        match result {
            Err(DatasetError::Integrity { rule, .. }) => rule,
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn tiny_bundle_is_valid() {
        tiny().validate().unwrap();
    }

    #[test]
    fn outer_length_mismatch_is_shape_error() {
        let mut b = tiny();
        b.valid.labels.push(vec![1]);
        assert_eq!(rule_of(b.validate()), "shape");
    }

    #[test]
    fn inner_length_mismatch_is_shape_error() {
        let mut b = tiny();
        b.test.words[0].push(2);
        assert_eq!(rule_of(b.validate()), "shape");
    }

    #[test]
    fn unknown_word_id_is_domain_error() {
        let mut b = tiny();
        b.train.words[0][1] = 99;
        assert_eq!(rule_of(b.validate()), "id-domain");
    }

    #[test]
    fn misaligned_table_id_is_reported() {
        let mut b = tiny();
        // Valid id, wrong slot for the label at this position.
        b.train.tables[0][0] = 171;
        assert_eq!(rule_of(b.validate()), "table-alignment");
    }

    #[test]
    fn duplicate_dictionary_value_is_rejected() {
        let mut b = tiny();
        b.dicts.words2idx.insert("pan".into(), 2);
        assert_eq!(rule_of(b.validate()), "injective");
    }

    #[test]
    fn unk_must_be_zero() {
        let mut b = tiny();
        b.dicts.words2idx.remove(UNK);
        b.dicts.words2idx.insert(UNK.into(), 7);
        assert_eq!(rule_of(b.validate()), "unk-sentinel");
    }

    #[test]
    fn outside_label_must_not_have_table_key() {
        let mut b = tiny();
        b.dicts.tables2idx.remove(NOTABLE);
        b.dicts.tables2idx.insert(OUTSIDE.into(), 171);
        assert_eq!(rule_of(b.validate()), "table-offset");
    }

    #[test]
    fn wrong_table_value_is_rejected() {
        let mut b = tiny();
        b.dicts.tables2idx.insert("B-supertype".into(), 172);
        assert_eq!(rule_of(b.validate()), "table-offset");
    }

    #[test]
    fn extra_table_key_is_rejected() {
        let mut b = tiny();
        b.dicts.tables2idx.insert("I-supertype".into(), 190);
        assert_eq!(rule_of(b.validate()), "table-offset");
    }

    #[test]
    fn label_id_near_max_is_error_not_panic() {
        let mut b = tiny();
        b.dicts.labels2idx.insert("B-purpose".into(), i32::MAX);
        b.dicts.tables2idx.insert("B-purpose".into(), 5);
        match b.validate() {
            Err(DatasetError::Integrity { rule, detail }) => {
                assert_eq!(rule, "table-offset");
                assert!(detail.contains("overflows"));
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_label_id_is_domain_error() {
        let mut b = tiny();
        b.train.labels[0][2] = 99;
        assert_eq!(rule_of(b.validate()), "id-domain");
    }

    #[test]
    fn unknown_table_id_is_domain_error() {
        let mut b = tiny();
        b.test.tables[0][1] = 999;
        assert_eq!(rule_of(b.validate()), "id-domain");
    }

    #[test]
    fn lookups_resolve_both_ways() {
        let b = tiny();
        assert_eq!(b.dicts.word_id("hawk"), Some(1));
        assert_eq!(b.dicts.word_id("zebra"), Some(0));
        assert_eq!(b.dicts.table_id("O"), Some(171));
        assert_eq!(b.dicts.table_id("B-supertype"), Some(170));
        assert_eq!(b.dicts.label_name(0), Some("B-supertype"));
        assert_eq!(b.dicts.word(2), Some("tree"));
        assert_eq!(b.dicts.label_name(42), None);
    }

    #[test]
    fn decode_labels_of_sentence() {
        let b = tiny();
        assert_eq!(
            b.train.decode_labels(0, &b.dicts),
            Some(vec!["B-supertype", "O", "O"])
        );
        assert_eq!(b.train.decode_labels(5, &b.dicts), None);
    }

    #[test]
    fn split_kind_display() {
        assert_eq!(SplitKind::Train.to_string(), "train");
        assert_eq!(SplitKind::Valid.to_string(), "valid");
        assert_eq!(SplitKind::Test.to_string(), "test");
    }
}
