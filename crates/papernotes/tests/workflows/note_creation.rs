use super::*;

const EXPECTED_ABSTRACT: &str = "We survey attention mechanisms across vision and language models. \
                                 Our taxonomy covers additive, multiplicative and sparse variants.";

#[traced_test]
#[tokio::test]
async fn test_note_and_pdf_written_to_vault() -> TestResult<()> {
  let mut server = mock_catalog().await;
  let pdf = mock_document(&mut server, 1).await;
  let (notes, vault_dir) = create_test_notes(&server);

  let outcome = notes.render_paper_note(PAPER_ID, &Config::default()).await?;

  let NoteOutcome::Created { note, document, opened, missing_section } = outcome else {
    panic!("expected a created note, got {outcome:?}");
  };
  assert_eq!(note.path, "papers/Attention- A Survey of Mechanisms.md");
  assert!(!opened);
  assert!(!missing_section);
  assert!(matches!(document, DocumentStatus::Downloaded(ref d) if d.size == PDF_BYTES.len()));

  let content = read_note(vault_dir.path(), "papers/Attention- A Survey of Mechanisms.md");
  assert_eq!(content, note.content);
  assert_eq!(
    content,
    format!(
      "# Attention: A Survey of Mechanisms\nAuthors: [[Ada Lovelace]], [[Alan Turing]], [[Grace \
       Hopper]]\nLink: [PDF](papers/_pdfs/{PAPER_ID}.pdf)\n\n## Abstract\n{EXPECTED_ABSTRACT}"
    )
  );

  let stored = std::fs::read(vault_dir.path().join("papers").join("_pdfs").join(format!("{PAPER_ID}.pdf")))?;
  assert_eq!(stored, PDF_BYTES);
  pdf.assert_async().await;
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_second_run_is_a_duplicate() -> TestResult<()> {
  let mut server = mock_catalog().await;
  let pdf = mock_document(&mut server, 1).await;
  let (notes, vault_dir) = create_test_notes(&server);
  let config = Config::default().with_file_name_format(FileNameFormat::Id);

  let first = notes.render_paper_note(PAPER_ID, &config).await?;
  assert!(matches!(first, NoteOutcome::Created { .. }));

  let note_path = vault_dir.path().join("papers").join(format!("{PAPER_ID}.md"));
  std::fs::write(&note_path, "edited by hand")?;

  let second = notes.render_paper_note(&format!("{}/pdf/{PAPER_ID}.pdf", server.url()), &config).await?;
  assert_eq!(second, NoteOutcome::Duplicate {
    path:     format!("papers/{PAPER_ID}.md"),
    document: DocumentStatus::Duplicate(format!("papers/_pdfs/{PAPER_ID}.pdf")),
  });
  assert_eq!(std::fs::read_to_string(note_path)?, "edited by hand");
  pdf.assert_async().await;
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_custom_template_from_config_file() -> TestResult<()> {
  let server = mock_catalog().await;
  let (notes, vault_dir) = create_test_notes(&server);
  let config = Config::from_toml(
    r#"
template = "---\ntitle: {{title}}\n---\n{{authors}}\n\n> {{abstract}}\n\n![[{{pdf_file}}]]\n{{title}}"
authors_as_link = false
file_name_format = "id"
folder = "inbox"
download_pdf = false
"#,
  )?;

  let outcome = notes.render_paper_note(PAPER_ID, &config).await?;
  assert!(matches!(outcome, NoteOutcome::Created { document: DocumentStatus::Disabled, .. }));

  let content = read_note(vault_dir.path(), &format!("inbox/{PAPER_ID}.md"));
  assert_eq!(
    content,
    format!(
      "---\ntitle: Attention: A Survey of Mechanisms\n---\nAuthors:Ada Lovelace, Alan Turing, Grace \
       Hopper\n\n> {EXPECTED_ABSTRACT}\n\n![[inbox/_pdfs/{PAPER_ID}.pdf]]\n{{{{title}}}}"
    )
  );
  assert!(!vault_dir.path().join("inbox").join("_pdfs").exists());
  Ok(())
}
