use std::fs;
use std::io::Write;
use std::path::Path;

use packmerge_merge::source::{collect, collect_one, InputSource};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn aar_native_libraries_land_under_lib() {
    let tmp = TempDir::new().unwrap();
    let aar = tmp.path().join("jsc-android.aar");
    write_zip(
        &aar,
        &[
            ("jni/x86_64/libjsc.so", b"jsc-x86_64"),
            ("AndroidManifest.xml", b"<manifest/>"),
            ("jni/arm64-v8a/libjsc.so", b"jsc-arm64"),
        ],
    );

    let files = collect_one(&InputSource::new("org.webkit:android-jsc:r245459", &aar)).unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path()).collect();
    assert_eq!(
        paths,
        vec![
            "AndroidManifest.xml",
            "lib/arm64-v8a/libjsc.so",
            "lib/x86_64/libjsc.so"
        ]
    );
    assert!(files.iter().all(|f| f.origin() == "org.webkit:android-jsc:r245459"));
    assert_eq!(files[1].content(), b"jsc-arm64");
}

#[test]
fn jar_entries_are_taken_verbatim() {
    let tmp = TempDir::new().unwrap();
    let jar = tmp.path().join("classes.jar");
    write_zip(&jar, &[("jni/readme.txt", b"not native")]);
    let files = collect_one(&InputSource::new("lib", &jar)).unwrap();
    assert_eq!(files[0].path(), "jni/readme.txt");
}

#[test]
fn directory_inputs_use_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("merged");
    fs::create_dir_all(dir.join("lib/arm64-v8a")).unwrap();
    fs::write(dir.join("lib/arm64-v8a/libapp.so"), b"app").unwrap();
    fs::write(dir.join("classes.dex"), b"dex").unwrap();

    let files = collect_one(&InputSource::new("app", &dir)).unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["classes.dex", "lib/arm64-v8a/libapp.so"]);
}

#[test]
fn collect_preserves_input_order() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("first.aar");
    let second = tmp.path().join("second.aar");
    write_zip(&first, &[("jni/x86/libc++_shared.so", b"first")]);
    write_zip(&second, &[("jni/x86/libc++_shared.so", b"second")]);

    let files = collect(&[
        InputSource::new("second", &second),
        InputSource::new("first", &first),
    ])
    .unwrap();
    let origins: Vec<&str> = files.iter().map(|f| f.origin()).collect();
    assert_eq!(origins, vec!["second", "first"]);
}

#[test]
fn missing_input_is_error() {
    let tmp = TempDir::new().unwrap();
    let err = collect_one(&InputSource::new("ghost", tmp.path().join("ghost.aar"))).unwrap_err();
    assert!(err.to_string().contains("Input `ghost` not found"), "got: {err}");
}

#[test]
fn corrupt_archive_is_error() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("bogus.jar");
    fs::write(&bogus, b"this is not a zip file").unwrap();
    let err = collect_one(&InputSource::new("bogus", &bogus)).unwrap_err();
    assert!(err.to_string().contains("Archive error"), "got: {err}");
}

#[test]
fn unsupported_extension_is_error() {
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("notes.txt");
    fs::write(&txt, b"hello").unwrap();
    let err = collect_one(&InputSource::new("notes", &txt)).unwrap_err();
    assert!(err.to_string().contains("Unsupported input"), "got: {err}");
}
