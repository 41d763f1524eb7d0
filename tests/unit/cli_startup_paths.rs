use tempfile::tempdir;

#[test]
fn resolve_startup_paths_joins_document_with_cwd() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let startup = super::resolve_startup_paths(cwd, ["page.json"]).unwrap();
    assert_eq!(startup.document, cwd.join("page.json"));
    assert!(startup.definitions.is_none());
}

#[test]
fn resolve_startup_paths_accepts_definitions_flag() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();
    std::fs::write(cwd.join("defs.json"), "{}").unwrap();

    let startup =
        super::resolve_startup_paths(cwd, ["--definitions=defs.json", "page.json"]).unwrap();
    assert_eq!(startup.document, cwd.join("page.json"));
    assert_eq!(startup.definitions, Some(cwd.join("defs.json")));
}

#[test]
fn resolve_startup_paths_requires_a_document() {
    let dir = tempdir().unwrap();
    let err = super::resolve_startup_paths(dir.path(), Vec::<String>::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    let err = super::resolve_startup_paths(dir.path(), ["a.json", "b.json"]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    let err = super::resolve_startup_paths(dir.path(), ["--verbose", "a.json"]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn resolve_startup_paths_errors_for_missing_directory_or_definitions() {
    let dir = tempdir().unwrap();
    let cwd = dir.path();

    let err = super::resolve_startup_paths(cwd, ["nope/page.json"]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);

    let err =
        super::resolve_startup_paths(cwd, ["page.json", "--definitions=missing.json"]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn load_definitions_falls_back_to_builtin() {
    let registry = super::load_definitions(None).unwrap();
    assert!(registry.resolve("hero").is_some());

    let dir = tempdir().unwrap();
    let path = dir.path().join("defs.json");
    std::fs::write(&path, "not json").unwrap();
    let err = super::load_definitions(Some(&path)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
