use serde::Serialize;

use super::hydraulics::SystemConfiguration;
use super::readings::{ReadingId, ReadingLog};

/// m³/h → L/min 환산 계수
pub const M3H_TO_LPM: f64 = 16.67;

/// 양정-유량 곡선의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub id: ReadingId,
    /// 유량 [L/min]
    pub flow_l_per_min: f64,
    /// 전양정 [m]
    pub head_m: f64,
}

/// 저장된 측정값으로 양정-유량 곡선을 만든다. 표시를 위해 유량 내림차순으로 정렬한다.
pub fn head_flow_curve(config: &SystemConfiguration, log: &ReadingLog) -> Vec<CurvePoint> {
    let mut points: Vec<CurvePoint> = log
        .iter()
        .zip(log.evaluate(config))
        .map(|(entry, (id, result))| CurvePoint {
            id,
            flow_l_per_min: entry.reading.flow_rate_m3_per_h * M3H_TO_LPM,
            head_m: result.total_head_m,
        })
        .collect();
    // sort_by는 안정 정렬이므로 같은 유량은 기록 순서를 유지한다.
    points.sort_by(|a, b| {
        b.flow_l_per_min
            .partial_cmp(&a.flow_l_per_min)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    points
}
