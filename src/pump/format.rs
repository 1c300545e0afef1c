//! 계산 결과를 화면 표시용 문자열로 바꾼다.

use super::hydraulics::CalculationResult;

/// 값이 정확히 0이면 입력 없음으로 보고 `---`를 돌려준다.
pub fn placeholder_or(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        "---".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// 필드별 표시 정밀도를 적용한 결과 문자열 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDisplay {
    pub velocity: String,
    pub reynolds: String,
    pub friction_factor: String,
    pub regime: String,
    pub friction_head_loss: String,
    pub minor_head_loss: String,
    pub pressure_head: String,
    pub total_head: String,
    pub hydraulic_power: String,
    pub shaft_power: String,
    pub overall_efficiency: String,
    pub pump_efficiency: String,
}

impl ResultDisplay {
    pub fn new(r: &CalculationResult) -> Self {
        Self {
            velocity: format!("{:.3}", r.velocity_m_per_s),
            reynolds: format!("{:.0}", r.reynolds_number),
            friction_factor: format!("{:.6}", r.friction_factor),
            regime: r.regime.label().to_string(),
            friction_head_loss: format!("{:.4}", r.friction_head_loss_m),
            minor_head_loss: format!("{:.4}", r.minor_head_loss_m),
            pressure_head: format!("{:.3}", r.pressure_head_m),
            total_head: format!("{:.3}", r.total_head_m),
            hydraulic_power: format!("{:.4}", r.hydraulic_power_kw),
            shaft_power: format!("{:.4}", r.shaft_power_kw),
            overall_efficiency: format!("{:.2}", r.overall_efficiency_pct),
            pump_efficiency: format!("{:.2}", r.pump_efficiency_pct),
        }
    }

    /// (영문 라벨, 값, 단위) 행 목록. CLI 표 출력과 GUI 그리드가 같은 순서를 쓴다.
    pub fn rows(&self) -> Vec<(&'static str, &str, &'static str)> {
        vec![
            ("Velocity", self.velocity.as_str(), "m/s"),
            ("Reynolds number", self.reynolds.as_str(), ""),
            ("Friction factor", self.friction_factor.as_str(), ""),
            ("Flow regime", self.regime.as_str(), ""),
            ("Friction head loss", self.friction_head_loss.as_str(), "m"),
            ("Minor head loss", self.minor_head_loss.as_str(), "m"),
            ("Pressure head", self.pressure_head.as_str(), "m"),
            ("Total head", self.total_head.as_str(), "m"),
            ("Hydraulic power", self.hydraulic_power.as_str(), "kW"),
            ("Shaft power", self.shaft_power.as_str(), "kW"),
            ("Overall efficiency", self.overall_efficiency.as_str(), "%"),
            ("Pump efficiency", self.pump_efficiency.as_str(), "%"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_only_for_exact_zero() {
        assert_eq!(placeholder_or(0.0, 2), "---");
        assert_eq!(placeholder_or(21.4234, 2), "21.42");
        assert_eq!(placeholder_or(-1.0, 1), "-1.0");
    }
}
