use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use stgp_rules::config::{EngineConfig, ScoreBounds};
use stgp_rules::{
    NodeRegistry, Rule, RuleEngineError, RuleIdentity, SemanticType, Snapshot, TreeBuilder,
};

static WARNINGS: AtomicUsize = AtomicUsize::new(0);

struct CountingLogger;

impl Log for CountingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            WARNINGS.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger;

// One test per binary: the logger is process-wide.
#[test]
fn test_configured_bounds_drive_warnings() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let registry = NodeRegistry::with_builtins();
    let b = TreeBuilder::new(&registry);
    let root = b.op("NEGATE", vec![b.constant(0.5).unwrap()]).unwrap();
    let identity = RuleIdentity::new("neg", "Negated");
    let rule = Rule::new(identity, SemanticType::RiskLevel, root).unwrap();
    let snapshot = Snapshot::default();

    let unit = EngineConfig {
        score_bounds: ScoreBounds { min: 0.0, max: 1.0 },
        strict_bounds: false,
        ..EngineConfig::default()
    };

    // Inside the default range: no warning
    assert_eq!(rule.execute(&snapshot).unwrap(), -0.5);
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 0);

    // Outside the configured range: returned unchanged, logged once
    assert_eq!(rule.execute_with(&snapshot, &unit).unwrap(), -0.5);
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);

    let strict = EngineConfig {
        strict_bounds: true,
        ..unit
    };
    let err = rule.execute_with(&snapshot, &strict).unwrap_err();
    assert!(matches!(
        err,
        RuleEngineError::ScoreOutOfBounds { min, max, .. } if min == 0.0 && max == 1.0
    ));
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);
}
