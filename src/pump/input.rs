use serde::{Deserialize, Serialize};

use super::hydraulics::{MeasurementReading, SystemConfiguration};
use super::piping::LossCoefficientInputs;

/// 텍스트 입력을 숫자로 바꾼다. 비어 있거나 해석할 수 없으면 0을 돌려준다.
pub fn parse_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 폼의 14개 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    MotorEfficiency,
    PipeLength,
    PipeDiameter,
    DepthOfWaterTable,
    DrawDown,
    MotorInputPower,
    FlowRate,
    GaugePressure,
    K1,
    K2,
    K3,
    K4,
    K5,
    K6,
}

impl FormField {
    pub const ALL: [FormField; 14] = [
        FormField::MotorEfficiency,
        FormField::PipeLength,
        FormField::PipeDiameter,
        FormField::DepthOfWaterTable,
        FormField::DrawDown,
        FormField::MotorInputPower,
        FormField::FlowRate,
        FormField::GaugePressure,
        FormField::K1,
        FormField::K2,
        FormField::K3,
        FormField::K4,
        FormField::K5,
        FormField::K6,
    ];

    /// 저장/CLI에서 쓰는 고정 키.
    pub fn key(self) -> &'static str {
        match self {
            FormField::MotorEfficiency => "nmotor",
            FormField::PipeLength => "length_of_pipe",
            FormField::PipeDiameter => "dia_of_pipe",
            FormField::DepthOfWaterTable => "depth_of_water_table",
            FormField::DrawDown => "draw_down",
            FormField::MotorInputPower => "motor_input_power",
            FormField::FlowRate => "q",
            FormField::GaugePressure => "pressure_gauge_value",
            FormField::K1 => "k1",
            FormField::K2 => "k2",
            FormField::K3 => "k3",
            FormField::K4 => "k4",
            FormField::K5 => "k5",
            FormField::K6 => "k6",
        }
    }

    /// 기본 영문 라벨(단위 포함).
    pub fn label(self) -> &'static str {
        match self {
            FormField::MotorEfficiency => "Motor efficiency (0-1)",
            FormField::PipeLength => "Length of pipe (m)",
            FormField::PipeDiameter => "Diameter of pipe (m)",
            FormField::DepthOfWaterTable => "Depth of water table (m)",
            FormField::DrawDown => "Draw-down (m)",
            FormField::MotorInputPower => "Motor input power (kW)",
            FormField::FlowRate => "Flow rate Q (m³/h)",
            FormField::GaugePressure => "Pressure gauge value (psi)",
            FormField::K1 => "K1 (90° elbow)",
            FormField::K2 => "K2 (gate valve)(open)",
            FormField::K3 => "K3 (foot valve)",
            FormField::K4 => "K4 (swing check valve)",
            FormField::K5 => "K5 Entrance (sharp)",
            FormField::K6 => "K6 (exit)",
        }
    }

    /// 키 문자열을 필드로 해석한다. 대소문자, `_`/`-` 구분자, camelCase 키를 모두 허용한다.
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        match normalized.as_str() {
            "nmotor" | "motorefficiency" => Some(FormField::MotorEfficiency),
            "lengthofpipe" | "pipelength" => Some(FormField::PipeLength),
            "diaofpipe" | "pipediameter" => Some(FormField::PipeDiameter),
            "depthofwatertable" | "staticsuctiondepth" => Some(FormField::DepthOfWaterTable),
            "drawdown" => Some(FormField::DrawDown),
            "motorinputpower" | "pmotorinputpower" => Some(FormField::MotorInputPower),
            "q" | "flowrate" => Some(FormField::FlowRate),
            "pressuregaugevalue" | "pressureguagevalue" | "gaugepressure" => {
                Some(FormField::GaugePressure)
            }
            "k1" => Some(FormField::K1),
            "k2" => Some(FormField::K2),
            "k3" => Some(FormField::K3),
            "k4" => Some(FormField::K4),
            "k5" => Some(FormField::K5),
            "k6" => Some(FormField::K6),
            _ => None,
        }
    }
}

/// 사용자가 입력한 원문 그대로의 폼 상태. 숫자 해석은 계산 직전에 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumpForm {
    pub motor_efficiency: String,
    pub pipe_length: String,
    pub pipe_diameter: String,
    pub depth_of_water_table: String,
    pub draw_down: String,
    pub motor_input_power: String,
    pub flow_rate: String,
    pub gauge_pressure: String,
    pub k: [String; 6],
}

impl Default for PumpForm {
    fn default() -> Self {
        Self {
            motor_efficiency: "0.85".into(),
            pipe_length: String::new(),
            pipe_diameter: String::new(),
            depth_of_water_table: String::new(),
            draw_down: String::new(),
            motor_input_power: String::new(),
            flow_rate: String::new(),
            gauge_pressure: String::new(),
            k: Default::default(),
        }
    }
}

impl PumpForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::MotorEfficiency => &self.motor_efficiency,
            FormField::PipeLength => &self.pipe_length,
            FormField::PipeDiameter => &self.pipe_diameter,
            FormField::DepthOfWaterTable => &self.depth_of_water_table,
            FormField::DrawDown => &self.draw_down,
            FormField::MotorInputPower => &self.motor_input_power,
            FormField::FlowRate => &self.flow_rate,
            FormField::GaugePressure => &self.gauge_pressure,
            FormField::K1 => &self.k[0],
            FormField::K2 => &self.k[1],
            FormField::K3 => &self.k[2],
            FormField::K4 => &self.k[3],
            FormField::K5 => &self.k[4],
            FormField::K6 => &self.k[5],
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::MotorEfficiency => &mut self.motor_efficiency,
            FormField::PipeLength => &mut self.pipe_length,
            FormField::PipeDiameter => &mut self.pipe_diameter,
            FormField::DepthOfWaterTable => &mut self.depth_of_water_table,
            FormField::DrawDown => &mut self.draw_down,
            FormField::MotorInputPower => &mut self.motor_input_power,
            FormField::FlowRate => &mut self.flow_rate,
            FormField::GaugePressure => &mut self.gauge_pressure,
            FormField::K1 => &mut self.k[0],
            FormField::K2 => &mut self.k[1],
            FormField::K3 => &mut self.k[2],
            FormField::K4 => &mut self.k[3],
            FormField::K5 => &mut self.k[4],
            FormField::K6 => &mut self.k[5],
        }
    }

    /// 필드 하나를 갱신한다.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn value(&self, field: FormField) -> f64 {
        parse_number(self.get(field))
    }

    /// 폼 값을 계산용 구성값으로 변환한다.
    pub fn configuration(&self) -> SystemConfiguration {
        let mut k = [0.0; 6];
        for (slot, text) in k.iter_mut().zip(self.k.iter()) {
            *slot = parse_number(text);
        }
        SystemConfiguration {
            pipe_length_m: parse_number(&self.pipe_length),
            pipe_diameter_m: parse_number(&self.pipe_diameter),
            static_suction_depth_m: parse_number(&self.depth_of_water_table),
            draw_down_m: parse_number(&self.draw_down),
            motor_efficiency: parse_number(&self.motor_efficiency),
            flow_rate_m3_per_h: parse_number(&self.flow_rate),
            loss_coefficients: LossCoefficientInputs::new(k),
        }
    }

    /// 폼에 붙어 있는 현재 측정값.
    pub fn live_reading(&self) -> MeasurementReading {
        MeasurementReading {
            motor_input_power_kw: parse_number(&self.motor_input_power),
            flow_rate_m3_per_h: parse_number(&self.flow_rate),
            gauge_pressure_psi: parse_number(&self.gauge_pressure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_garbage_parse_to_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert_eq!(parse_number("-3"), -3.0);
    }

    #[test]
    fn default_form_has_motor_efficiency_only() {
        let form = PumpForm::default();
        let cfg = form.configuration();
        assert_eq!(cfg.motor_efficiency, 0.85);
        assert_eq!(cfg.pipe_diameter_m, 0.0);
        assert_eq!(form.live_reading(), MeasurementReading::default());
    }

    #[test]
    fn set_and_get_every_field() {
        let mut form = PumpForm::default();
        for (i, field) in FormField::ALL.iter().enumerate() {
            form.set(*field, format!("{i}"));
        }
        for (i, field) in FormField::ALL.iter().enumerate() {
            assert_eq!(form.get(*field), i.to_string());
            assert_eq!(form.value(*field), i as f64);
        }
        assert_eq!(form.configuration().loss_coefficients.k[5], 13.0);
    }

    #[test]
    fn keys_resolve_in_several_spellings() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("diaOfPipe"), Some(FormField::PipeDiameter));
        assert_eq!(
            FormField::from_key("pressureGuageValue"),
            Some(FormField::GaugePressure)
        );
        assert_eq!(FormField::from_key("K3"), Some(FormField::K3));
        assert_eq!(FormField::from_key("power_factor"), None);
    }
}
