use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const INPUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tmx version="1.4">
  <header creationtool="Tool" creationtoolversion="1" datatype="plaintext" segtype="sentence" adminlang="en" srclang="es" o-tmf="x" creationdate="20200101T000000Z" changedate="">
    <prop type="x-domain">medicine</prop>
  </header>
  <body>
    <tu tuid="3"><tuv xml:lang="es"><seg># Zebra</seg></tuv><tuv xml:lang="en"><seg>Zebra</seg></tuv></tu>
    <tu tuid="1" usagecount=""><tuv xml:lang="es"><seg>Apple</seg></tuv></tu>
    <tu tuid="2"><prop type="x-origin">mt</prop><tuv xml:lang="es" changeid="ana"><seg>%Banana &amp; co</seg></tuv></tu>
  </body>
</tmx>"#;

const EXPECTED: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
    r#"<tmx version="1.4">"#,
    r#"<header adminlang="en" changedate="" creationdate="20200101T000000Z" creationtool="Tool" creationtoolversion="1" datatype="plaintext" o-tmf="x" segtype="sentence" srclang="es">"#,
    r#"<prop type="x-domain">medicine</prop></header>"#,
    r#"<body>"#,
    r#"<tu tuid="1" usagecount=""><tuv xml:lang="es"><seg>Apple</seg></tuv></tu>"#,
    r#"<tu tuid="2"><prop type="x-origin">mt</prop><tuv changeid="ana" xml:lang="es"><seg>%Banana &amp; co</seg></tuv></tu>"#,
    r#"<tu tuid="3"><tuv xml:lang="es"><seg># Zebra</seg></tuv><tuv xml:lang="en"><seg>Zebra</seg></tuv></tu>"#,
    r#"</body></tmx>"#,
);

fn tmx_sort(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tmx-sort"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run tmx-sort")
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn sorts_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "tm.tmx", INPUT);

    let output = tmx_sort(&[&input], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn sorting_sorted_output_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "sorted.tmx", EXPECTED);

    let output = tmx_sort(&[&input], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "tm.tmx", INPUT);
    let out_path = dir.path().join("sorted.tmx");

    let output = tmx_sort(&[&input, "--output", &out_path.to_string_lossy()], dir.path());
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(fs::read_to_string(&out_path).unwrap(), EXPECTED);
}

#[test]
fn default_input_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("test")).unwrap();
    write_input(&dir, "test/tm.tmx", INPUT);

    let output = tmx_sort(&[], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED);
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    let output = tmx_sort(&["nope.tmx"], dir.path());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error opening file nope.tmx"));
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "bad.tmx", "<tmx><body><tu></body></tmx>");

    let output = tmx_sort(&[&input], dir.path());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parser error at byte"));
}

#[test]
fn line_breaks_in_attributes_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "ws.tmx",
        "<tmx><body><tu tuid=\"a&#10;b\"><tuv lang=\"en\"><seg>x&#13;\ny</seg></tuv></tu></body></tmx>",
    );

    let output = tmx_sort(&[&input], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(r#"<tu tuid="a&#xA;b">"#), "{}", stdout);
    assert!(stdout.contains("<seg>x&#xD;\ny</seg>"), "{}", stdout);
}

#[test]
fn unit_without_variants_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        &dir,
        "novariant.tmx",
        r#"<tmx><body><tu tuid="a"><tuv lang="en"><seg>a</seg></tuv></tu><tu tuid="b"></tu></body></tmx>"#,
    );

    let output = tmx_sort(&[&input], dir.path());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Translation unit #1 (tuid b) has no <tuv> variants"));
}

#[test]
fn header_changedate_tri_state() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("<header/>", None),
        (r#"<header changedate=""/>"#, Some(r#"changedate="""#)),
        (r#"<header changedate="2020-01-01"/>"#, Some(r#"changedate="2020-01-01""#)),
    ];

    for (i, (header, expected)) in cases.into_iter().enumerate() {
        let input = write_input(&dir, &format!("h{}.tmx", i), &format!("<tmx>{}<body/></tmx>", header));
        let output = tmx_sort(&[&input], dir.path());
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        match expected {
            Some(attr) => assert!(stdout.contains(attr), "{} missing from {}", attr, stdout),
            None => assert!(!stdout.contains("changedate"), "unexpected changedate in {}", stdout),
        }
    }
}
