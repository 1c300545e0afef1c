use super::hydraulics::SystemConfiguration;
use super::readings::ReadingLog;

pub const CSV_HEADER: &str = "id,motor_input_power_kw,flow_rate_m3_per_h,gauge_pressure_psi,total_head_m,hydraulic_power_kw,overall_efficiency_pct,pump_efficiency_pct,shaft_power_kw";

/// 저장된 측정값과 평가 결과를 CSV 문자열로 만든다. 기록 순서를 유지한다.
pub fn readings_csv(config: &SystemConfiguration, log: &ReadingLog) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (entry, (id, r)) in log.iter().zip(log.evaluate(config)) {
        csv.push_str(&format!(
            "{},{},{},{},{:.6},{:.6},{:.4},{:.4},{:.6}\n",
            id.0,
            entry.reading.motor_input_power_kw,
            entry.reading.flow_rate_m3_per_h,
            entry.reading.gauge_pressure_psi,
            r.total_head_m,
            r.hydraulic_power_kw,
            r.overall_efficiency_pct,
            r.pump_efficiency_pct,
            r.shaft_power_kw
        ));
    }
    csv
}
