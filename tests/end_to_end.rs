mod common;

use common::{
    company_pairs, config_in, output_files, page_operators, page_strings, write_workbook, DateCell, Row,
};
use invoice_forge::{app, InvoiceError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn two_rows_with_one_reference_make_one_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_workbook(
        &config.input.path,
        &[Row::new("R100", "Strategy workshop"), Row::new("R100", "Follow-up report")],
        &company_pairs(),
    );

    let summary = app::run(&config, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(summary.invoices_written, 1);
    assert_eq!(summary.rows_rendered, 2);

    let files = output_files(dir.path());
    assert_eq!(files, vec![dir.path().join("invoices/invoice_R100.pdf")]);

    let strings = page_strings(&files[0]);
    for label in ["Item", "Description", "Quantity", "Unit Price", "Subtotal", "Tax", "Amount"] {
        assert_eq!(strings.iter().filter(|s| *s == label).count(), 1, "header `{label}`");
    }
    assert!(strings.iter().any(|s| s == "Strategy workshop"));
    assert!(strings.iter().any(|s| s == "Follow-up report"));
    assert_eq!(strings.iter().filter(|s| *s == "1,234").count(), 2);
    assert_eq!(strings.iter().filter(|s| *s == "999.50").count(), 2);
    assert_eq!(strings.iter().filter(|s| *s == "0.00").count(), 6);

    assert!(strings.iter().any(|s| s == "Invoice Number: R100"));
    assert!(strings.iter().any(|s| s == "Toronto, ON"));
    assert!(strings.iter().any(|s| s == "Toronto,ON"));
    assert!(strings.iter().any(|s| s == "All amounts in CAD"));
    assert!(strings.iter().any(|s| s.starts_with("Payment Terms:")));
}

#[test]
fn each_reference_gets_its_own_file_across_date_forms() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_workbook(
        &config.input.path,
        &[
            Row::new("R300", "a").dated(DateCell::Text("03/15/2024")),
            Row::new("R100", "b").dated(DateCell::Serial(45366.0)),
            Row::new("R300", "c"),
            Row::new("R200", "d").dated(DateCell::Text("2024-03-15 09:30:00")),
        ],
        &company_pairs(),
    );

    let summary = app::run(&config, &mut StdRng::seed_from_u64(5)).unwrap();
    let names: Vec<_> = summary
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["invoice_R300.pdf", "invoice_R100.pdf", "invoice_R200.pdf"]);
    assert_eq!(output_files(dir.path()).len(), 3);

    for file in &summary.files {
        let strings = page_strings(file);
        let date = strings
            .iter()
            .find_map(|s| s.strip_prefix("Invoice Date: "))
            .unwrap();
        let due = strings
            .iter()
            .find_map(|s| s.strip_prefix("Due Date: "))
            .unwrap();
        let date = chrono::NaiveDate::parse_from_str(date, "%m/%d/%Y").unwrap();
        let due = chrono::NaiveDate::parse_from_str(due, "%m/%d/%Y").unwrap();
        let payment = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!((due - date).num_days(), 30);
        assert!((0..=30).contains(&(payment - date).num_days()));
    }
}

#[test]
fn empty_company_sheet_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_workbook(&config.input.path, &[Row::new("R1", "a")], &[]);

    let err = app::run(&config, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, InvoiceError::EmptyCompanyProfile));
    assert!(output_files(dir.path()).is_empty());
}

#[test]
fn missing_workbook_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = app::run(&config, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, InvoiceError::Workbook(_)));
}

#[test]
fn unparseable_payment_date_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_workbook(
        &config.input.path,
        &[Row::new("R1", "a").dated(DateCell::Text("2022/13/40"))],
        &company_pairs(),
    );

    let err = app::run(&config, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, InvoiceError::DateParse { ref value } if value == "2022/13/40"));
}

#[test]
fn logo_is_embedded_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    image::RgbaImage::from_pixel(64, 32, image::Rgba([200, 30, 30, 255]))
        .save(&config.output.logo_path)
        .unwrap();
    write_workbook(&config.input.path, &[Row::new("R9", "a")], &company_pairs());

    let summary = app::run(&config, &mut StdRng::seed_from_u64(2)).unwrap();
    assert!(page_operators(&summary.files[0]).iter().any(|op| op == "Do"));
}

#[test]
fn same_seed_renders_the_same_dates() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    for dir in [&first, &second] {
        let config = config_in(dir.path());
        write_workbook(&config.input.path, &[Row::new("R1", "a")], &company_pairs());
        app::run(&config, &mut StdRng::seed_from_u64(99)).unwrap();
    }

    let dates = |dir: &tempfile::TempDir| -> Vec<String> {
        page_strings(&dir.path().join("invoices/invoice_R1.pdf"))
            .into_iter()
            .filter(|s| s.contains("Date: "))
            .collect()
    };
    assert_eq!(dates(&first), dates(&second));
}

#[test]
fn blank_reference_rows_are_skipped_and_ties_round_to_even() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut tie = Row::new("R5", "Half day");
    tie.quantity = Some(2.5);
    tie.unit_price = Some(2.675);
    tie.amount = Some(1234.125);
    write_workbook(
        &config.input.path,
        &[tie, Row::new("", "orphan"), Row::new("R6", "b")],
        &company_pairs(),
    );

    let summary = app::run(&config, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(summary.invoices_written, 2);
    assert_eq!(summary.rows_rendered, 2);
    assert!(!dir.path().join("invoices/invoice_.pdf").exists());

    let strings = page_strings(&dir.path().join("invoices/invoice_R5.pdf"));
    assert!(strings.iter().any(|s| s == "2"));
    assert!(strings.iter().any(|s| s == "2.67"));
    assert!(strings.iter().any(|s| s == "1,234.12"));
}
