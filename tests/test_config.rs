use space_invaders::config::{SimConfig, COMPLEXITY, HEIGHT, WIDTH};
use space_invaders::{ConfigError, Simulation};

#[test]
fn default_config_matches_constants() {
    let config = SimConfig::default();
    assert_eq!(config.width, WIDTH);
    assert_eq!(config.height, HEIGHT);
    assert_eq!(config.complexity, COMPLEXITY);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn fire_bound_scales_with_complexity() {
    assert_eq!(SimConfig::default().fire_bound(), 20); // complexity 5
    let hard = SimConfig {
        complexity: 100,
        ..SimConfig::default()
    };
    assert_eq!(hard.fire_bound(), 1);
}

#[test]
fn rejects_complexity_out_of_range() {
    for complexity in [0, 101] {
        let config = SimConfig {
            complexity,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidComplexity(complexity))
        );
    }
}

#[test]
fn rejects_tiny_field() {
    let config = SimConfig {
        width: 20,
        ..SimConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::FieldTooSmall { width: 20, .. })
    ));
}

#[test]
fn simulation_new_propagates_config_errors() {
    let config = SimConfig {
        complexity: 0,
        ..SimConfig::default()
    };
    assert!(Simulation::new(config).is_err());
    assert!(Simulation::new(SimConfig::default()).is_ok());
}
