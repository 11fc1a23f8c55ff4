//! End-to-end flows against a file-backed store in a temporary directory.

use daybook::app::capability::{RecordingModal, RecordingNavigator, StaticAuth};
use daybook::app::{
    derive_view, DeleteFlow, EditForm, ListQuery, Modal, RetrospectForm, Route, SubmitOutcome,
    WriteForm,
};
use daybook::{open_session, open_store, AuthCapability, Config, Emotion, NewDiary, Store};
use std::fs;
use std::path::Path;

fn config_in(dir: &Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        storage_key: "diaries".to_string(),
        log_level: None,
        log_file: None,
    }
}

#[test]
fn first_diary_is_persisted_and_opened() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut store = open_store(&config).unwrap();
    let mut modal = RecordingModal::default();
    let mut nav = RecordingNavigator::default();

    let mut form = WriteForm::new();
    form.set_title("첫 번째 일기");
    form.set_content("오늘은 날씨가 좋았다.");
    form.set_emotion(Some(Emotion::Happy));
    let outcome = form.submit(&mut store, &mut modal, &mut nav).unwrap();

    let SubmitOutcome::Saved(record) = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(record.id, 1);
    assert_eq!(nav.current().map(|r| r.path()), Some("/diaries/1".to_string()));
    assert_eq!(modal.last(), Some(&Modal::success("일기 등록 완료")));

    let reopened = open_store(&config).unwrap();
    let loaded = reopened.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "첫 번째 일기");
    assert_eq!(loaded[0].emotion, Emotion::Happy);

    let raw = fs::read_to_string(dir.path().join("diaries")).unwrap();
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"HAPPY\""));
    assert!(!raw.contains("retrospect"));
}

#[test]
fn edits_and_retrospects_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut store = open_store(&config).unwrap();
    let mut modal = RecordingModal::default();
    let mut nav = RecordingNavigator::default();

    let record = store
        .append(NewDiary::new("산책", "공원을 걸었다", Emotion::Etc))
        .unwrap();

    let mut edit = EditForm::from_record(&record);
    edit.set_emotion(Some(Emotion::Surprise));
    edit.submit(&mut store, &mut modal, &mut nav).unwrap();

    let mut retro = RetrospectForm::new(record.id);
    retro.set_text("다음에는 더 멀리 가보자");
    retro.submit(&mut store).unwrap();

    let reopened = open_store(&config).unwrap();
    let stored = reopened.get(record.id).unwrap();
    assert_eq!(stored.emotion, Emotion::Surprise);
    assert_eq!(stored.title, "산책");
    assert_eq!(stored.retrospect.as_deref(), Some("다음에는 더 멀리 가보자"));
    assert_eq!(stored.created_at, record.created_at);
}

#[test]
fn malformed_storage_reads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("diaries"), "{not json").unwrap();

    let mut store = open_store(&config_in(dir.path())).unwrap();
    let view = derive_view(&store.load(), &ListQuery::default());
    assert!(view.is_empty());
    assert_eq!(view.total_pages, 1);

    let record = store
        .append(NewDiary::new("복구", "새로 시작", Emotion::Etc))
        .unwrap();
    assert_eq!(record.id, 1);
}

#[test]
fn delete_requires_login_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut store = open_store(&config).unwrap();
    let mut modal = RecordingModal::default();
    let mut nav = RecordingNavigator::default();
    let record = store
        .append(NewDiary::new("지울 일기", "내용", Emotion::Sad))
        .unwrap();

    let mut auth = open_session(&config).unwrap();
    assert!(!auth.is_logged_in());

    let mut flow = DeleteFlow::new(record.id);
    assert!(!flow.request(&auth, &mut modal));
    assert_eq!(modal.last(), Some(&Modal::LoginPrompt));
    assert_eq!(store.load().len(), 1);

    auth.login("token").unwrap();
    assert!(open_session(&config).unwrap().is_logged_in());

    assert!(flow.request(&auth, &mut modal));
    assert!(flow.confirm(&auth, &mut store, &mut modal, &mut nav).unwrap());
    assert_eq!(nav.current(), Some(Route::DiaryList));
    assert!(open_store(&config).unwrap().load().is_empty());
}

#[test]
fn confirmed_delete_rechecks_login() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&config_in(dir.path())).unwrap();
    let mut modal = RecordingModal::default();
    let mut nav = RecordingNavigator::default();
    let record = store
        .append(NewDiary::new("남을 일기", "내용", Emotion::Angry))
        .unwrap();

    let mut flow = DeleteFlow::new(record.id);
    assert!(flow.request(&StaticAuth(true), &mut modal));
    let removed = flow
        .confirm(&StaticAuth(false), &mut store, &mut modal, &mut nav)
        .unwrap();

    assert!(!removed);
    assert_eq!(modal.last(), Some(&Modal::LoginPrompt));
    assert_eq!(store.load().len(), 1);
    assert_eq!(nav.current(), None);
}

#[test]
fn config_file_redirects_storage() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("profile");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "data_dir = \"{}\"\nstorage_key = \"journal\"\n",
            data.display()
        ),
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let mut store = open_store(&config).unwrap();
    store
        .append(NewDiary::new("설정", "다른 위치", Emotion::Etc))
        .unwrap();

    assert!(data.join("journal").exists());
    assert!(!data.join("diaries").exists());
}
