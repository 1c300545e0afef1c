//! 수력 계산 엔진 회귀 테스트. 손으로 검산한 현장 조건을 기준값으로 쓴다.
use pump_efficiency_toolbox::pump::{
    calculate, evaluate_reading, friction_factor, FlowRegime, FormField, LossCoefficientInputs,
    MeasurementReading, PipeFlow, PumpForm, SystemConfiguration,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn field_config() -> SystemConfiguration {
    SystemConfiguration {
        pipe_length_m: 50.0,
        pipe_diameter_m: 0.1,
        static_suction_depth_m: 5.0,
        draw_down_m: 2.0,
        motor_efficiency: 0.85,
        flow_rate_m3_per_h: 36.0,
        loss_coefficients: LossCoefficientInputs::default(),
    }
}

fn field_reading() -> MeasurementReading {
    MeasurementReading {
        motor_input_power_kw: 10.0,
        flow_rate_m3_per_h: 36.0,
        gauge_pressure_psi: 20.0,
    }
}

#[test]
fn field_scenario_matches_hand_calculation() {
    // Q = 0.01 m³/s, d = 0.1 m
    let r = calculate(&field_config(), &field_reading());
    assert_close("v", r.velocity_m_per_s, 1.273_236_567, 1e-8);
    assert_close("Re", r.reynolds_number, 127_323.656_735, 1e-8);
    assert_eq!(r.regime, FlowRegime::Turbulent);
    assert_close("f", r.friction_factor, 0.016_749_784, 1e-8);
    assert_close("hf", r.friction_head_loss_m, 0.691_987_750, 1e-8);
    assert_eq!(r.minor_head_loss_m, 0.0);
    assert_close("pressure head", r.pressure_head_m, 14.064, 1e-12);
    assert_close("H", r.total_head_m, 21.755_987_750, 1e-8);
    assert_close("P_hyd", r.hydraulic_power_kw, 2.134_262_398, 1e-8);
    assert_close("eta_overall", r.overall_efficiency_pct, 21.342_623_983, 1e-8);
    assert_close("eta_pump", r.pump_efficiency_pct, 25.108_969_392, 1e-8);
    // 축동력 = 모터 입력 × 모터 효율
    assert_close("shaft", r.shaft_power_kw, 8.5, 1e-9);
}

#[test]
fn fittings_add_minor_loss() {
    let mut config = field_config();
    config.loss_coefficients = LossCoefficientInputs::new([2.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let base = calculate(&field_config(), &field_reading());
    let r = calculate(&config, &field_reading());
    // ΣK = 0.6·2 + 0.15 + 4 + 2 + 0.5 + 1 = 8.85
    assert_close("hminor", r.minor_head_loss_m, 0.731_244_266, 1e-8);
    assert_close(
        "H",
        r.total_head_m,
        base.total_head_m + r.minor_head_loss_m,
        1e-12,
    );
}

#[test]
fn laminar_side_of_boundary_uses_64_over_re() {
    // d = 0.01 m, Re ≈ 1999
    let config = SystemConfiguration {
        pipe_length_m: 10.0,
        pipe_diameter_m: 0.01,
        flow_rate_m3_per_h: 0.056_520_525_6,
        ..SystemConfiguration::default()
    };
    let flow = PipeFlow::from_configuration(&config);
    assert!(flow.reynolds_number < 2000.0, "Re={}", flow.reynolds_number);
    assert_close("Re", flow.reynolds_number, 1999.0, 1e-6);
    assert_eq!(flow.regime, FlowRegime::Laminar);
    assert_eq!(flow.friction_factor, 64.0 / flow.reynolds_number);
}

#[test]
fn turbulent_side_of_boundary_uses_blasius() {
    let config = SystemConfiguration {
        pipe_length_m: 10.0,
        pipe_diameter_m: 0.01,
        flow_rate_m3_per_h: 0.056_6,
        ..SystemConfiguration::default()
    };
    let flow = PipeFlow::from_configuration(&config);
    assert!(flow.reynolds_number >= 2000.0, "Re={}", flow.reynolds_number);
    assert_eq!(flow.regime, FlowRegime::Turbulent);
    assert_eq!(
        flow.friction_factor,
        0.3164 * flow.reynolds_number.powf(-0.25)
    );
}

#[test]
fn reynolds_2000_is_turbulent() {
    assert_eq!(FlowRegime::from_reynolds(2000.0), FlowRegime::Turbulent);
    assert_eq!(friction_factor(2000.0), 0.3164 * 2000.0_f64.powf(-0.25));
    assert_eq!(FlowRegime::from_reynolds(1999.999_999), FlowRegime::Laminar);
    assert_eq!(friction_factor(1999.999_999), 64.0 / 1999.999_999);
    assert_eq!(friction_factor(0.0), 0.0);
}

#[test]
fn zero_diameter_skips_pipe_terms() {
    let mut config = field_config();
    config.pipe_diameter_m = 0.0;
    config.loss_coefficients = LossCoefficientInputs::new([1.0; 6]);
    let r = calculate(&config, &field_reading());
    assert_eq!(r.velocity_m_per_s, 0.0);
    assert_eq!(r.reynolds_number, 0.0);
    assert_eq!(r.friction_factor, 0.0);
    assert_eq!(r.regime, FlowRegime::Laminar);
    assert_eq!(r.friction_head_loss_m, 0.0);
    assert_eq!(r.minor_head_loss_m, 0.0);
    // 정수두와 압력수두는 그대로 남는다
    assert_close("H", r.total_head_m, 5.0 + 2.0 + 14.064, 1e-12);
}

#[test]
fn zero_guards_resolve_to_zero() {
    let mut reading = field_reading();
    reading.motor_input_power_kw = 0.0;
    let r = calculate(&field_config(), &reading);
    assert_eq!(r.overall_efficiency_pct, 0.0);
    assert_eq!(r.pump_efficiency_pct, 0.0);
    assert_eq!(r.shaft_power_kw, 0.0);
    assert!(r.hydraulic_power_kw > 0.0);

    let mut config = field_config();
    config.motor_efficiency = 0.0;
    let r = calculate(&config, &field_reading());
    assert!(r.overall_efficiency_pct > 0.0);
    assert_eq!(r.pump_efficiency_pct, 0.0);
    assert_eq!(r.shaft_power_kw, 0.0);
}

#[test]
fn empty_form_produces_all_zero_result() {
    let mut form = PumpForm::default();
    form.set(FormField::MotorEfficiency, "");
    let r = calculate(&form.configuration(), &form.live_reading());
    assert_eq!(r.total_head_m, 0.0);
    assert_eq!(r.hydraulic_power_kw, 0.0);
    assert_eq!(r.overall_efficiency_pct, 0.0);
    assert_eq!(r.pump_efficiency_pct, 0.0);
    assert_eq!(r.shaft_power_kw, 0.0);
}

#[test]
fn pipe_terms_follow_form_flow_not_reading_flow() {
    let config = field_config();
    let flow = PipeFlow::from_configuration(&config);
    let low = MeasurementReading {
        flow_rate_m3_per_h: 18.0,
        ..field_reading()
    };
    let high = MeasurementReading {
        flow_rate_m3_per_h: 72.0,
        ..field_reading()
    };
    let a = evaluate_reading(&config, &flow, &low);
    let b = evaluate_reading(&config, &flow, &high);

    // 유속/Re/손실은 폼 유량(36 m³/h)에서 나온 값을 공유한다
    assert_eq!(a.velocity_m_per_s, b.velocity_m_per_s);
    assert_eq!(a.reynolds_number, b.reynolds_number);
    assert_eq!(a.friction_head_loss_m, b.friction_head_loss_m);
    assert_eq!(a.total_head_m, b.total_head_m);
    // 수동력은 각 측정값의 유량에 비례한다
    assert_close("P ratio", b.hydraulic_power_kw / a.hydraulic_power_kw, 4.0, 1e-12);

    // 기록 평가 경로와 단건 계산 경로가 같은 값을 낸다
    assert_eq!(evaluate_reading(&config, &flow, &field_reading()), calculate(&config, &field_reading()));
}

#[test]
fn form_text_flows_into_calculation() {
    let mut form = PumpForm::default();
    for (field, value) in [
        (FormField::PipeLength, "50"),
        (FormField::PipeDiameter, " 0.1 "),
        (FormField::DepthOfWaterTable, "5"),
        (FormField::DrawDown, "2"),
        (FormField::MotorInputPower, "10"),
        (FormField::FlowRate, "36"),
        (FormField::GaugePressure, "20"),
        (FormField::K1, "oops"),
    ] {
        form.set(field, value);
    }
    let r = calculate(&form.configuration(), &form.live_reading());
    let expected = calculate(&field_config(), &field_reading());
    assert_eq!(r, expected);
}
