#![allow(missing_docs, clippy::tests_outside_test_module)]

use std::{fs, path::Path, process::Command};

use assert_cmd::{
    assert::{Assert, OutputAssertExt},
    cargo::CommandCargoExt,
};
use tempfile::tempdir;

#[allow(deprecated)]
fn cfit(args: &[&str], files: &[&Path]) -> Assert {
    let mut cmd = Command::cargo_bin("cfit").expect("binary exists");
    cmd.args(args).args(files);
    cmd.assert()
}

fn stderr(out: &Assert) -> String {
    String::from_utf8_lossy(&out.get_output().stderr).into_owned()
}

fn write_points(path: &Path, text: &str) {
    fs::write(path, text).expect("write points");
}

fn knot_lines(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|l| l.split(" | ").map(str::to_string).collect())
        .collect()
}

#[test]
fn fits_two_points_to_stdout() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("line.txt");
    write_points(&input, "0 0\n3 0\n");

    let out = cfit(&["fit", "-e", "0.1", "--orig-index"], &[&input]).success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");
    assert_eq!(stdout, "-1 0 | 0 0 | 1 0 | 0\n2 0 | 3 0 | 4 0 | 1\n");
}

#[test]
fn writes_knots_to_file_with_corners() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("corner.csv");
    let output = td.path().join("knots.txt");
    write_points(
        &input,
        "# right angle\n0,0\n1,0\n2,0\n3,0\n3,1\n3,2\n3,3\n",
    );

    cfit(&["fit", "-c", "0,3,6", "--orig-index"], &[&input, &output]).success();

    let text = fs::read_to_string(&output).expect("read output");
    let knots = knot_lines(&text);
    assert_eq!(knots.len(), 3);
    assert_eq!(knots[1][1], "3 0");
    let indices: Vec<&str> = knots.iter().map(|k| k[3].as_str()).collect();
    assert_eq!(indices, ["0", "3", "6"]);
}

#[test]
fn samples_are_a_point_file() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("arc.txt");
    let output = td.path().join("samples.txt");
    let arc: String = (0..20)
        .map(|i| {
            let a = f64::from(i) / 19.0 * 3.0;
            format!("{} {}\n", a.cos() * 10.0, a.sin() * 10.0)
        })
        .collect();
    write_points(&input, &arc);

    cfit(&["sample", "-e", "0.01", "-n", "8"], &[&input, &output]).success();

    let text = fs::read_to_string(&output).expect("read output");
    let rows: Vec<&str> = text.lines().collect();
    assert!(rows.len() >= 9);
    assert_eq!((rows.len() - 1) % 8, 0);
    assert!(rows.iter().all(|r| r.split(' ').count() == 2));
    assert_eq!(rows[0], "10 0");

    // The output can be fit again.
    cfit(&["fit"], &[&output]).success();
}

#[test]
fn rejects_ragged_input() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("bad.txt");
    write_points(&input, "0 0\n1 1 1\n");
    let out = cfit(&["fit"], &[&input]).failure();
    assert!(stderr(&out).contains("line 2"));
}

#[test]
fn rejects_invalid_corners() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("pts.txt");
    write_points(&input, "0 0\n1 1\n2 0\n");
    let out = cfit(&["fit", "-c", "0,1"], &[&input]).failure();
    assert!(stderr(&out).contains("last corner"));
}

#[test]
fn rejects_bad_threshold_and_missing_file() {
    let td = tempdir().expect("tmp");
    let input = td.path().join("pts.txt");
    write_points(&input, "0 0\n1 1\n");
    cfit(&["fit", "-e", "0"], &[&input]).failure();
    cfit(&["fit"], &[&td.path().join("missing.txt")]).failure();
}
