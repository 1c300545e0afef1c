//! 펌프 수력 계산 엔진.
//!
//! Darcy-Weisbach 마찰손실, 피팅 부차손실, 수동력, 종합/펌프 효율을 닫힌 식으로 계산한다.
//! 모든 0 나눗셈은 예외 대신 0으로 처리한다.

use serde::{Deserialize, Serialize};

use super::piping::LossCoefficientInputs;

/// 중력가속도 [m/s²]
pub const G: f64 = 9.81;
/// 유속 계산에 쓰는 4자리 원주율 (std::f64::consts::PI 아님)
pub const PI_4DP: f64 = 3.1416;
/// Re = 1e6 × v × d (동점도 1e-6 m²/s 물 가정)
pub const REYNOLDS_SCALE: f64 = 1e6;
/// 층류/난류 경계 레이놀즈수
pub const LAMINAR_LIMIT: f64 = 2000.0;
/// psi → m 수두 환산
pub const PSI_TO_HEAD_M: f64 = 0.7032;
/// 물 밀도 [kg/m³]
pub const WATER_DENSITY: f64 = 1000.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// 계산에 공유되는 배관/모터 구성값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemConfiguration {
    /// 배관 길이 [m]
    pub pipe_length_m: f64,
    /// 배관 내경 [m]
    pub pipe_diameter_m: f64,
    /// 지하수면까지 깊이 [m]
    pub static_suction_depth_m: f64,
    /// 양수 시 추가 수위강하 [m]
    pub draw_down_m: f64,
    /// 모터 효율 (0~1 분수)
    pub motor_efficiency: f64,
    /// 폼 자체의 유량 [m³/h]. 유속/Re/마찰계수/손실수두는 항상 이 값으로 계산한다.
    pub flow_rate_m3_per_h: f64,
    pub loss_coefficients: LossCoefficientInputs,
}

impl Default for SystemConfiguration {
    fn default() -> Self {
        Self {
            pipe_length_m: 0.0,
            pipe_diameter_m: 0.0,
            static_suction_depth_m: 0.0,
            draw_down_m: 0.0,
            motor_efficiency: 0.85,
            flow_rate_m3_per_h: 0.0,
            loss_coefficients: LossCoefficientInputs::default(),
        }
    }
}

/// 현장 측정값 한 건.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementReading {
    /// 모터 입력 전력 [kW]
    pub motor_input_power_kw: f64,
    /// 유량 [m³/h]
    pub flow_rate_m3_per_h: f64,
    /// 압력계 지시값 [psi]
    pub gauge_pressure_psi: f64,
}

/// 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl FlowRegime {
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowRegime::Laminar => "Laminar",
            FlowRegime::Turbulent => "Turbulent",
        }
    }
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 레이놀즈수로 Darcy 마찰계수를 구한다. Re가 0 이하이면 0.
pub fn friction_factor(reynolds: f64) -> f64 {
    match FlowRegime::from_reynolds(reynolds) {
        FlowRegime::Laminar if reynolds > 0.0 => 64.0 / reynolds,
        FlowRegime::Laminar => 0.0,
        // 매끈한 관 Blasius 상관식
        FlowRegime::Turbulent => 0.3164 * reynolds.powf(-0.25),
    }
}

/// 구성값의 유량으로만 결정되는 배관 유동 물리량.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeFlow {
    /// 유속 [m/s]
    pub velocity_m_per_s: f64,
    pub reynolds_number: f64,
    /// Darcy 마찰계수
    pub friction_factor: f64,
    pub regime: FlowRegime,
    /// 마찰 손실수두 [m]
    pub friction_head_loss_m: f64,
    /// 피팅 부차 손실수두 [m]
    pub minor_head_loss_m: f64,
}

impl PipeFlow {
    /// 구성값(폼 유량 포함)으로 유속, Re, 마찰계수, 손실수두를 계산한다.
    pub fn from_configuration(config: &SystemConfiguration) -> Self {
        let k_total = config.loss_coefficients.total();
        let q_m3_s = config.flow_rate_m3_per_h / SECONDS_PER_HOUR;
        let d = config.pipe_diameter_m;

        let velocity = if d > 0.0 {
            (4.0 * q_m3_s) / (PI_4DP * d * d)
        } else {
            0.0
        };
        let reynolds = REYNOLDS_SCALE * velocity * d;

        let regime = FlowRegime::from_reynolds(reynolds);
        let f = friction_factor(reynolds);

        let v_squared = velocity * velocity;
        let friction_head_loss = if d > 0.0 {
            f * (config.pipe_length_m / d) * v_squared / (2.0 * G)
        } else {
            0.0
        };
        let minor_head_loss = k_total * v_squared / (2.0 * G);

        Self {
            velocity_m_per_s: velocity,
            reynolds_number: reynolds,
            friction_factor: f,
            regime,
            friction_head_loss_m: friction_head_loss,
            minor_head_loss_m: minor_head_loss,
        }
    }
}

/// 구성값 + 측정값 한 쌍에 대한 계산 결과. 저장하지 않고 매번 다시 계산한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub velocity_m_per_s: f64,
    pub reynolds_number: f64,
    pub friction_factor: f64,
    pub regime: FlowRegime,
    pub friction_head_loss_m: f64,
    pub minor_head_loss_m: f64,
    /// 압력계 환산 수두 [m]
    pub pressure_head_m: f64,
    /// 전양정 [m]
    pub total_head_m: f64,
    /// 수동력 [kW]
    pub hydraulic_power_kw: f64,
    /// 축동력 [kW]
    pub shaft_power_kw: f64,
    /// 종합 효율 [%]
    pub overall_efficiency_pct: f64,
    /// 펌프 효율 [%]
    pub pump_efficiency_pct: f64,
}

/// 구성값과 측정값으로 전체 결과를 계산한다.
pub fn calculate(config: &SystemConfiguration, reading: &MeasurementReading) -> CalculationResult {
    let flow = PipeFlow::from_configuration(config);
    evaluate_reading(config, &flow, reading)
}

/// 미리 계산한 배관 유동값을 재사용해 측정값 한 건을 평가한다.
///
/// 전양정 이후의 값(수동력, 효율, 축동력)만 측정값의 유량/전력/압력을 사용한다.
pub fn evaluate_reading(
    config: &SystemConfiguration,
    flow: &PipeFlow,
    reading: &MeasurementReading,
) -> CalculationResult {
    let q_m3_s = reading.flow_rate_m3_per_h / SECONDS_PER_HOUR;
    let pressure_head = PSI_TO_HEAD_M * reading.gauge_pressure_psi;
    let total_head = config.static_suction_depth_m
        + config.draw_down_m
        + flow.friction_head_loss_m
        + flow.minor_head_loss_m
        + pressure_head;

    let hydraulic_power = (WATER_DENSITY * G * q_m3_s * total_head) / 1000.0;
    let overall_efficiency = if reading.motor_input_power_kw > 0.0 {
        (hydraulic_power / reading.motor_input_power_kw) * 100.0
    } else {
        0.0
    };
    // 백분율 ÷ 분수 효율
    let pump_efficiency = if config.motor_efficiency > 0.0 {
        overall_efficiency / config.motor_efficiency
    } else {
        0.0
    };
    let shaft_power = if pump_efficiency > 0.0 {
        hydraulic_power / (pump_efficiency / 100.0)
    } else {
        0.0
    };

    CalculationResult {
        velocity_m_per_s: flow.velocity_m_per_s,
        reynolds_number: flow.reynolds_number,
        friction_factor: flow.friction_factor,
        regime: flow.regime,
        friction_head_loss_m: flow.friction_head_loss_m,
        minor_head_loss_m: flow.minor_head_loss_m,
        pressure_head_m: pressure_head,
        total_head_m: total_head,
        hydraulic_power_kw: hydraulic_power,
        shaft_power_kw: shaft_power,
        overall_efficiency_pct: overall_efficiency,
        pump_efficiency_pct: pump_efficiency,
    }
}
