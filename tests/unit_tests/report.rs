use sumfact::element::{FeDgp, FeQ, FeSystem};
use sumfact::quadrature::univariate::gauss;
use sumfact::report::{log_detected_element_types, DiagnosticLog, DEFAULT_PREFIX};
use sumfact::shape_info::ElementType;

#[test]
fn log_lines_are_prefixed() {
    let mut log = DiagnosticLog::new(Vec::new());
    assert_eq!(log.prefix(), DEFAULT_PREFIX);
    log.log_line("first").unwrap();
    log.log_line(format_args!("second {}", 2)).unwrap();
    let output = String::from_utf8(log.into_inner()).unwrap();
    assert_eq!(output, "sumfact::first\nsumfact::second 2\n");
}

#[test]
fn custom_prefix() {
    let mut log = DiagnosticLog::with_prefix(Vec::new(), "DEAL");
    log.log_line("OK").unwrap();
    assert_eq!(log.into_inner(), b"DEAL::OK\n");
}

#[test]
fn one_line_per_base_element() {
    let system = FeSystem::<f64, 2>::builder()
        .with_base_element(FeQ::new(6).unwrap(), 2)
        .with_base_element(FeDgp::new(5), 3)
        .build()
        .unwrap();
    let mut log = DiagnosticLog::new(Vec::new());
    let detected = log_detected_element_types(&mut log, &system, &gauss::<f64>(3)).unwrap();
    assert_eq!(detected, vec![ElementType::TensorSymmetric, ElementType::TruncatedTensor]);

    let output = String::from_utf8(log.into_inner()).unwrap();
    insta::assert_snapshot!(output, @r###"
    sumfact::Detected shape info type for FE_Q<2>(6): 2
    sumfact::Detected shape info type for FE_DGP<2>(5): 4
    "###);
}

#[test]
fn classification_errors_are_reported() {
    let quadrature: (Vec<f64>, Vec<sumfact::nalgebra::Point1<f64>>) = (Vec::new(), Vec::new());
    let mut log = DiagnosticLog::new(Vec::new());
    let element = FeQ::<f64>::new(2).unwrap();
    let result = log_detected_element_types::<f64, _, _, 1>(&mut log, &element, &quadrature);
    let err = result.unwrap_err();
    assert!(format!("{err:?}").contains("The quadrature rule has no points"));
    assert!(log.into_inner().is_empty());
}
