use mailparse::MailHeaderMap;
use std::fs;
use std::path::PathBuf;

use mailport::{
    BatchImporter, CompoundAttachment, CompoundMail, CompoundParser, CompoundSource, EmlWriter,
    MboxBackend, ParseError,
};

/// Parser stand-in producing a fully featured message: both bodies,
/// high importance, one attachment with a payload and one without.
struct FakeParser;

impl CompoundParser for FakeParser {
    fn parse(&self, _raw: &[u8]) -> Result<CompoundMail, ParseError> {
        Ok(CompoundMail {
            subject: Some("Quarterly report".into()),
            sender: Some("\"Doe, John\" <john@example.com>".into()),
            to: Some("\"Roe, Jane\" <jane@example.com>, max@example.com".into()),
            cc: Some("cc@example.com".into()),
            body_plain: Some("See attachment.".into()),
            body_html: Some("<p>See attachment.</p>".into()),
            importance: Some(2),
            attachments: vec![
                CompoundAttachment {
                    filename: Some("broken.xls".into()),
                    content_type: None,
                    payload: None,
                },
                CompoundAttachment {
                    filename: Some("report.csv".into()),
                    content_type: Some("text/csv".into()),
                    payload: Some(b"a;b;c".to_vec()),
                },
            ],
            ..CompoundMail::default()
        })
    }
}

#[test]
fn test_compound_to_eml_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("converted");
    fs::create_dir(&out_dir).unwrap();

    let input = dir.path().join("report.msg");
    fs::write(&input, "raw compound bytes").unwrap();

    let report = BatchImporter
        .convert_each(
            &EmlWriter,
            &CompoundSource::new(FakeParser),
            &[input],
            Some(&out_dir),
        )
        .unwrap();

    assert_eq!(1, report.succeeded.len());
    assert!(report.failed.is_empty());
    assert!(report.succeeded[0].ends_with("report.eml"));

    let eml = fs::read(&report.succeeded[0]).unwrap();
    let parsed = mailparse::parse_mail(&eml).unwrap();
    let headers = parsed.get_headers();

    assert_eq!(
        Some("Quarterly report".into()),
        headers.get_first_value("Subject")
    );
    assert_eq!(Some("1".into()), headers.get_first_value("X-Priority"));
    assert_eq!(Some("High".into()), headers.get_first_value("Importance"));
    assert!(headers.get_first_value("Bcc").is_none());

    // mixed tree with the alternative body first, then the one
    // attachment that still had a payload
    assert_eq!("multipart/mixed", parsed.ctype.mimetype);
    assert_eq!(2, parsed.subparts.len());
    assert_eq!("multipart/alternative", parsed.subparts[0].ctype.mimetype);
    assert_eq!("text/csv", parsed.subparts[1].ctype.mimetype);

    let disposition = parsed.subparts[1].get_content_disposition();
    assert_eq!(
        Some(&"report.csv".to_string()),
        disposition.params.get("filename")
    );
}

#[test]
fn test_invalid_inputs_fail_alone() {
    struct PickyParser;

    impl CompoundParser for PickyParser {
        fn parse(&self, raw: &[u8]) -> Result<CompoundMail, ParseError> {
            if raw == b"bad" {
                return Err(ParseError::NotACompoundFile("no OLE signature".into()));
            }
            Ok(CompoundMail {
                subject: Some("ok".into()),
                body_plain: Some("ok".into()),
                ..CompoundMail::default()
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = [("one.msg", "good"), ("two.msg", "bad"), ("three.msg", "good")]
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect();

    let report = BatchImporter
        .convert_each(&EmlWriter, &CompoundSource::new(PickyParser), &paths, None)
        .unwrap();

    assert_eq!(2, report.succeeded.len());
    assert_eq!(1, report.failed.len());
    assert!(report.failed[0].path.ends_with("two.msg"));
    assert!(report.failed[0]
        .reason
        .contains("not a genuine compound mail file"));
    // the failing input produced no output file
    assert!(!dir.path().join("two.eml").exists());
}

#[test]
fn test_eml_to_mbox_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let eml_path = dir.path().join("incoming.eml");
    fs::write(
        &eml_path,
        "From: alice@localhost\r\nSubject: fallback\r\n\r\nHello!\r\n",
    )
    .unwrap();

    let mbox_path = dir.path().join("import.mbox");
    let backend = MboxBackend::new(&mbox_path);

    let report = BatchImporter
        .import_all(
            &backend,
            &mailport::EmlSource,
            &[eml_path],
            "ignored folder",
        )
        .unwrap();

    assert_eq!(1, report.succeeded.len());

    let content = fs::read_to_string(&mbox_path).unwrap();
    assert!(content.starts_with("From alice@localhost "));
    assert!(content.contains("Subject: fallback"));
}
