use rust_decimal_macros::dec;
use size_core::{
    ChangeError, ErrorSeverity, Length, LookDirection, Magnitude, RecordId, SizeConfig, SizeError,
    StatKind, UnitSystem,
};
use size_runtime::{
    InMemoryRecordRepo, RecordRepository, RepositoryError, RuntimeConfig, ServiceError,
    SizeService,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn service() -> SizeService<InMemoryRecordRepo> {
    init_tracing();
    SizeService::new(InMemoryRecordRepo::new(), RuntimeConfig::default())
}

#[test]
fn register_then_multiply() {
    let service = service();
    let ann = RecordId(1);

    let record = service.register(ann, "Ann").unwrap();
    assert_eq!(record.height(), &SizeConfig::average_height());
    assert_eq!(record.tag(), "<@1>");

    let updated = service.change(ann, "multiply", "10").unwrap();
    assert_eq!(updated.height(), &Length::from_base(dec!(17.54)));
    assert_eq!(service.load(ann).unwrap(), updated);

    let stats = service.stats(ann).unwrap();
    assert_eq!(stats.viewscale, Magnitude::new(dec!(0.1)));
    assert_eq!(stats.weight_scale, Magnitude::from(1000));

    let sentence = service.stat_sentence(ann, StatKind::Height).unwrap();
    assert!(sentence.starts_with("<@1>'s current height is 17.54"));
}

#[test]
fn rejected_changes_are_not_saved() {
    let service = service();
    let ann = RecordId(1);
    let before = service.register(ann, "Ann").unwrap();

    let cases = [
        ("divide", "0", "CHANGE_DIVISION_BY_ZERO", ErrorSeverity::Arithmetic),
        ("multiply", "1", "CHANGE_NO_OP_VALUE", ErrorSeverity::Validation),
        ("power", "0", "CHANGE_ZERO_VALUE", ErrorSeverity::Validation),
        ("grow", "2", "CHANGE_INVALID_STYLE", ErrorSeverity::Validation),
    ];
    for (style, amount, code, severity) in cases {
        let err = service.change(ann, style, amount).unwrap_err();
        assert_eq!(err.error_code(), code, "{style} {amount}");
        assert_eq!(err.severity(), severity);
        assert_eq!(service.load(ann).unwrap(), before);
    }

    assert!(matches!(
        service.change(ann, "divide", "0"),
        Err(ServiceError::Change(ChangeError::DivisionByZero))
    ));
}

#[test]
fn additive_changes_take_lengths() {
    let service = service();
    let ann = RecordId(1);
    service.register(ann, "Ann").unwrap();

    let grown = service.change(ann, "+", "2m").unwrap();
    assert_eq!(grown.height(), &Length::from_base(dec!(3.754)));

    let shrunk = service.change(ann, "sub", "10m").unwrap();
    assert_eq!(shrunk.height(), &Length::zero());
}

#[test]
fn astronomical_records_survive_storage() {
    let service = service();
    let ann = RecordId(1);
    service.register(ann, "Ann").unwrap();

    let grown = service.change(ann, "x", "1e40").unwrap();
    let stored = service.load(ann).unwrap();
    assert_eq!(stored, grown);
    assert_eq!(stored.weight().magnitude().exponent(), Some(124));

    let shrunk = service.change(ann, "/", "1e80").unwrap();
    assert!(!shrunk.weight().is_zero());
    assert_eq!(shrunk.height(), &Length::parse("1.754e-40 m").unwrap());
}

#[test]
fn compare_two_records() {
    let service = service();
    service.register(RecordId(1), "Ann").unwrap();
    service.register(RecordId(2), "Bo").unwrap();
    service.change(RecordId(2), "x", "10").unwrap();

    let comparison = service.compare(RecordId(2), RecordId(1)).unwrap();
    assert_eq!(comparison.small.nickname, "Ann");
    assert_eq!(comparison.big.nickname, "Bo");
    assert_eq!(comparison.multiplier, Magnitude::from(10));
    assert_eq!(comparison.look_direction, LookDirection::Up);
    assert_eq!(
        comparison.big_to_small.height,
        Length::from_base(dec!(17.54))
    );
}

#[test]
fn unknown_and_duplicate_ids() {
    let service = service();
    assert!(matches!(
        service.stats(RecordId(9)),
        Err(ServiceError::Repository(RepositoryError::NotFound(RecordId(9))))
    ));
    assert_eq!(
        service.compare(RecordId(9), RecordId(9)).unwrap_err().severity(),
        ErrorSeverity::NotFound
    );

    service.register(RecordId(1), "Ann").unwrap();
    assert!(matches!(
        service.register(RecordId(1), "Ann again"),
        Err(ServiceError::AlreadyRegistered(RecordId(1)))
    ));
    assert_eq!(service.repository().count().unwrap(), 1);
}

#[test]
fn missing_optional_stats() {
    let service = service();
    service.register(RecordId(1), "Ann").unwrap();
    assert!(matches!(
        service.stat_sentence(RecordId(1), StatKind::Tail),
        Err(ServiceError::NoSuchStat(RecordId(1), StatKind::Tail))
    ));
}

#[test]
fn configured_defaults_apply_to_new_records() {
    init_tracing();
    let size = SizeConfig::default()
        .with_unit_system(UnitSystem::Us)
        .with_new_record_height(Length::from_base(dec!(2)));
    let service = SizeService::new(InMemoryRecordRepo::new(), RuntimeConfig::new(size));

    let record = service.register(RecordId(1), "Ann").unwrap();
    assert_eq!(record.unit_system(), UnitSystem::Us);
    assert_eq!(record.height(), &Length::from_base(dec!(2)));
    assert_eq!(record.base_height(), &Length::from_base(dec!(2)));
    assert_eq!(record.scale(), Magnitude::one());
}
