use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("dermascore_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn grades_header() -> String {
    let mut header = String::from("Age");
    for name in FEATURE_COLUMNS {
        header.push(',');
        header.push_str(name);
    }
    header.push('\n');
    header
}

#[test]
fn test_load_grades_shapes() {
    let dir = make_temp_dir();
    let path = dir.join("grades.csv");

    let mut csv = grades_header();
    csv.push_str("25,1,2,3,2,1,2,1\n");
    csv.push_str("42,3,2,4,3,2,3,2\n");
    csv.push_str("61,4,4,4,3,3,3,3\n");
    write_file(&path, &csv);

    let table = load_grades(&path).unwrap();
    assert_eq!(table.n_subjects(), 3);
    assert_eq!(table.features.dim(), (3, N_FEATURES));
    assert_eq!(table.ages, vec![25, 42, 61]);
    assert_eq!(table.features[[1, 2]], 4.0);
}

#[test]
fn test_columns_are_matched_by_name_not_position() {
    let dir = make_temp_dir();
    let path = dir.join("grades.csv");

    // Same columns, scrambled order.
    write_file(
        &path,
        "r_cheek_pore,Age,lip_dryness,chin_sagging,forehead_wrinkle,forehead_pigmentation,glabellus_wrinkle,l_cheek_pore\n\
         7,30,6,1,3,2,4,5\n",
    );

    let table = load_grades(&path).unwrap();
    assert_eq!(table.ages, vec![30]);
    // Feature matrix stays in FEATURE_COLUMNS order.
    assert_eq!(
        table.features.row(0).to_vec(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    );
}

#[test]
fn test_missing_column_is_an_error() {
    let dir = make_temp_dir();
    let path = dir.join("grades.csv");

    write_file(&path, "Age,chin_sagging\n30,1\n");
    let err = load_grades(&path).unwrap_err();
    assert!(matches!(err, InputError::Csv(_)));
}

#[test]
fn test_unparsable_field_is_an_error() {
    let dir = make_temp_dir();
    let path = dir.join("grades.csv");

    let mut csv = grades_header();
    csv.push_str("25,1,2,three,2,1,2,1\n");
    write_file(&path, &csv);
    assert!(load_grades(&path).is_err());
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = make_temp_dir();
    let path = dir.join("grades.csv");

    write_file(&path, &grades_header());
    let err = load_grades(&path).unwrap_err();
    assert!(matches!(err, InputError::Empty(_)));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = make_temp_dir();
    assert!(load_grades(&dir.join("nope.csv")).is_err());
}
