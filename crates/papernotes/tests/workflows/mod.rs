use super::*;

mod note_creation;

#[traced_test]
#[tokio::test]
async fn test_preview_writes_nothing() -> TestResult<()> {
  let server = mock_catalog().await;
  let (notes, vault_dir) = create_test_notes(&server);

  let prepared = notes.preview(&format!("{}/abs/{PAPER_ID}", server.url()), &Config::default()).await?;

  assert_eq!(prepared.id.as_str(), PAPER_ID);
  assert_eq!(prepared.fields.title, "Attention: A Survey of Mechanisms");
  assert!(prepared.content.starts_with("# Attention: A Survey of Mechanisms\n"));
  assert_eq!(std::fs::read_dir(vault_dir.path())?.count(), 0);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_unreachable_paper_is_an_error() {
  let mut server = Server::new_async().await;
  server.mock("GET", format!("/abs/{PAPER_ID}").as_str()).with_status(404).create_async().await;
  let (notes, vault_dir) = create_test_notes(&server);

  let result = notes.render_paper_note(PAPER_ID, &Config::default()).await;

  assert!(matches!(result, Err(PaperNotesError::Network(_))));
  assert_eq!(std::fs::read_dir(vault_dir.path()).unwrap().count(), 0);
}

#[traced_test]
#[tokio::test]
async fn test_pdf_failure_stops_before_note() {
  let mut server = mock_catalog().await;
  server
    .mock("GET", format!("/pdf/{PAPER_ID}.pdf").as_str())
    .with_status(500)
    .create_async()
    .await;
  let (notes, vault_dir) = create_test_notes(&server);

  let result = notes.render_paper_note(PAPER_ID, &Config::default()).await;

  assert!(matches!(result, Err(PaperNotesError::Network(_))));
  // The PDF folder was already created when the download failed.
  assert!(vault_dir.path().join("papers").join("_pdfs").is_dir());
  assert_eq!(std::fs::read_dir(vault_dir.path().join("papers")).unwrap().count(), 1);
}

#[traced_test]
#[tokio::test]
async fn test_title_cannot_place_note_outside_vault() {
  let mut server = Server::new_async().await;
  server
    .mock("GET", format!("/abs/{PAPER_ID}").as_str())
    .with_status(200)
    .with_body(r#"<div id="abs"><h1 class="title">Title:../../escaped</h1></div>"#)
    .create_async()
    .await;
  let dir = tempdir().unwrap();
  let root = dir.path().join("vault");
  let notes = PaperNotes::new(FsVault::new(&root))
    .with_catalog(Catalog::with_base_url(&server.url()).unwrap());
  let config = Config::default().with_download_pdf(false);

  let result = notes.render_paper_note(PAPER_ID, &config).await;

  assert!(matches!(result, Err(PaperNotesError::Storage(_))));
  assert!(!dir.path().join("escaped.md").exists());
  assert!(!root.join("papers").exists());
}
