//! The hand-authored fold-3 dataset.
//!
//! Four annotated definition sentences make up `train`; `valid` and `test`
//! each reuse one of them. Table ids are the label ids shifted by
//! [`TABLE_OFFSET`](crate::dataset::TABLE_OFFSET).

use crate::dataset::{DatasetBundle, Dictionaries, Index, Sequence, Split};

const TRAIN_WORDS: &[&[i32]] = &[
    &[26, 41, 16, 36, 8, 18, 13, 17, 31, 21, 0, 9, 15, 32, 38, 40, 6],
    &[7, 33, 28, 16, 36, 23, 5, 12, 13, 39, 22, 2, 14, 19],
    &[34, 35, 24, 10, 37, 21, 4],
    &[29, 30, 27, 22, 20, 40, 3, 11, 36, 25, 1],
];

const TRAIN_TABLES: &[&[i32]] = &[
    &[170, 171, 170, 172, 172, 172, 173, 174, 174, 174, 174, 174, 175, 176, 177, 177, 177],
    &[170, 170, 171, 178, 179, 179, 179, 179, 173, 174, 174, 174, 174, 174],
    &[180, 171, 175, 171, 173, 174, 174],
    &[171, 170, 170, 172, 172, 181, 182, 182, 182, 182, 182],
];

const TRAIN_LABELS: &[&[i32]] = &[
    &[0, 1, 0, 2, 2, 2, 3, 4, 4, 4, 4, 4, 5, 6, 7, 7, 7],
    &[0, 0, 1, 8, 9, 9, 9, 9, 3, 4, 4, 4, 4, 4],
    &[10, 1, 5, 1, 3, 4, 4],
    &[1, 0, 0, 2, 2, 11, 12, 12, 12, 12, 12],
];

const VALID_WORDS: &[&[i32]] = &[&[34, 35, 24, 10, 37, 21, 4]];
const VALID_TABLES: &[&[i32]] = &[&[180, 171, 175, 171, 173, 174, 174]];
const VALID_LABELS: &[&[i32]] = &[&[10, 1, 5, 1, 3, 4, 4]];

const TEST_WORDS: &[&[i32]] = &[&[7, 33, 28, 16, 36, 23, 5, 12, 13, 39, 22, 2, 14, 19]];
const TEST_TABLES: &[&[i32]] = &[
    &[170, 170, 171, 178, 179, 179, 179, 179, 173, 174, 174, 174, 174, 174],
];
const TEST_LABELS: &[&[i32]] = &[&[0, 0, 1, 8, 9, 9, 9, 9, 3, 4, 4, 4, 4, 4]];

const LABELS: &[(&str, i32)] = &[
    ("B-differentia-quality", 0),
    ("B-supertype", 1),
    ("I-differentia-quality", 2),
    ("B-differentia-event", 3),
    ("I-differentia-event", 4),
    ("O", 5),
    ("B-associated-fact", 6),
    ("I-associated-fact", 7),
    ("B-origin-location", 8),
    ("I-origin-location", 9),
    ("B-accessory-determiner", 10),
    ("B-purpose", 11),
    ("I-purpose", 12),
];

const TABLES: &[(&str, i32)] = &[
    ("B-differentia-quality", 170),
    ("B-supertype", 171),
    ("I-differentia-quality", 172),
    ("B-differentia-event", 173),
    ("I-differentia-event", 174),
    ("<NOTABLE>", 175),
    ("B-associated-fact", 176),
    ("I-associated-fact", 177),
    ("B-origin-location", 178),
    ("I-origin-location", 179),
    ("B-accessory-determiner", 180),
    ("B-purpose", 181),
    ("I-purpose", 182),
];

const WORDS: &[(&str, i32)] = &[
    ("<UNK>", 0),
    ("minerals", 1),
    ("strong", 2),
    ("separate", 3),
    ("another", 4),
    ("United", 5),
    ("farmers", 6),
    ("medium-sized", 7),
    ("northern", 8),
    ("rodents", 9),
    ("layer", 10),
    ("out", 11),
    ("States", 12),
    ("that", 13),
    ("durable", 14),
    ("and", 15),
    ("of", 16),
    ("feeds", 17),
    ("hemisphere", 18),
    ("wood", 19),
    ("pan", 20),
    ("on", 21),
    ("a", 22),
    ("eastern", 23),
    ("or", 24),
    ("precious", 25),
    ("large", 26),
    ("in", 27),
    ("tree", 28),
    ("wash", 29),
    ("dirt", 30),
    ("chiefly", 31),
    ("is", 32),
    ("deciduous", 33),
    ("any", 34),
    ("stratum", 35),
    ("the", 36),
    ("superimposed", 37),
    ("beneficial", 38),
    ("yields", 39),
    ("to", 40),
    ("hawk", 41),
];

fn sequences(rows: &[&[i32]]) -> Vec<Sequence> {
    rows.iter().map(|row| row.to_vec()).collect()
}

fn split(words: &[&[i32]], tables: &[&[i32]], labels: &[&[i32]]) -> Split {
    Split {
        words: sequences(words),
        tables: sequences(tables),
        labels: sequences(labels),
    }
}

fn index(pairs: &[(&str, i32)]) -> Index {
    pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

/// Build the dataset bundle from the literals above.
///
/// Debug and test builds validate the result and panic on a broken
/// invariant, so an editing slip in the tables fails immediately.
pub fn build_dataset() -> DatasetBundle {
    let bundle = DatasetBundle {
        train: split(TRAIN_WORDS, TRAIN_TABLES, TRAIN_LABELS),
        valid: split(VALID_WORDS, VALID_TABLES, VALID_LABELS),
        test: split(TEST_WORDS, TEST_TABLES, TEST_LABELS),
        dicts: Dictionaries {
            labels2idx: index(LABELS),
            tables2idx: index(TABLES),
            words2idx: index(WORDS),
        },
    };

    if cfg!(debug_assertions)
        && let Err(e) = bundle.validate()
    {
        panic!("fixture literals are inconsistent: {e}");
    }

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{NOTABLE, SplitKind, TABLE_OFFSET};

    #[test]
    fn literals_validate() {
        build_dataset().validate().unwrap();
    }

    #[test]
    fn split_sizes() {
        let b = build_dataset();
        assert_eq!(b.train.len(), 4);
        assert_eq!(b.valid.len(), 1);
        assert_eq!(b.test.len(), 1);
        assert_eq!(b.train.token_count(), 17 + 14 + 7 + 11);
    }

    #[test]
    fn second_train_sentence() {
        let b = build_dataset();
        assert_eq!(b.train.words[1], vec![7, 33, 28, 16, 36, 23, 5, 12, 13, 39, 22, 2, 14, 19]);
        assert_eq!(b.train.labels[1], vec![0, 0, 1, 8, 9, 9, 9, 9, 3, 4, 4, 4, 4, 4]);
        assert_eq!(
            b.train.tables[1],
            vec![170, 170, 171, 178, 179, 179, 179, 179, 173, 174, 174, 174, 174, 174]
        );
        assert!(b.train.words[1].len() == 14 && b.train.tables[1].len() == 14);
    }

    #[test]
    fn well_known_ids() {
        let d = build_dataset().dicts;
        assert_eq!(d.words2idx["minerals"], 1);
        assert_eq!(d.labels2idx["O"], 5);
        assert_eq!(d.words2idx["<UNK>"], 0);
        assert_eq!(d.tables2idx[NOTABLE], d.labels2idx["O"] + TABLE_OFFSET);
        assert_eq!(d.labels2idx.len(), 13);
        assert_eq!(d.tables2idx.len(), 13);
        assert_eq!(d.words2idx.len(), 42);
    }

    #[test]
    fn held_out_sentences_repeat_train() {
        let b = build_dataset();
        assert_eq!(b.valid.words[0], b.train.words[2]);
        assert_eq!(b.test.words[0], b.train.words[1]);
        assert_eq!(b.split(SplitKind::Test).labels[0], b.train.labels[1]);
    }

    #[test]
    fn decodes_purpose_span() {
        let b = build_dataset();
        let names = b.train.decode_labels(3, &b.dicts).unwrap();
        assert_eq!(names[5], "B-purpose");
        assert!(names[6..].iter().all(|n| *n == "I-purpose"));
        assert_eq!(b.dicts.word(b.train.words[3][4]), Some("pan"));
    }
}
