use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::hydraulics::{evaluate_reading, CalculationResult, MeasurementReading, PipeFlow, SystemConfiguration};

/// 저장된 측정값의 식별자. 삭제 후에도 재사용하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingId(pub u64);

impl std::fmt::Display for ReadingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for ReadingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(ReadingId)
    }
}

/// 측정 기록 조작 오류.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadingLogError {
    #[error("no reading with id {0}")]
    NotFound(ReadingId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedReading {
    pub id: ReadingId,
    pub reading: MeasurementReading,
}

/// 순서가 유지되는 측정 기록. 식별자 카운터도 함께 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingLog {
    next_id: u64,
    entries: Vec<LoggedReading>,
}

impl Default for ReadingLog {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl ReadingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록 끝에 추가하고 새 식별자를 돌려준다.
    pub fn append(&mut self, reading: MeasurementReading) -> ReadingId {
        // 외부에서 편집된 저장 파일도 중복 id가 나오지 않도록 최대값 이후부터 발급
        let floor = self
            .entries
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        let id = ReadingId(self.next_id.max(floor));
        self.next_id = id.0.saturating_add(1);
        self.entries.push(LoggedReading {
            id,
            reading: finite_only(reading),
        });
        debug!(%id, "reading appended");
        id
    }

    /// 해당 식별자의 측정값만 교체한다.
    pub fn update(&mut self, id: ReadingId, reading: MeasurementReading) -> Result<(), ReadingLogError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ReadingLogError::NotFound(id))?;
        entry.reading = finite_only(reading);
        debug!(%id, "reading updated");
        Ok(())
    }

    pub fn remove(&mut self, id: ReadingId) -> Result<LoggedReading, ReadingLogError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ReadingLogError::NotFound(id))?;
        debug!(%id, "reading removed");
        Ok(self.entries.remove(pos))
    }

    /// 모든 기록을 지운다. 식별자 카운터는 유지한다.
    pub fn clear(&mut self) {
        debug!(count = self.entries.len(), "reading log cleared");
        self.entries.clear();
    }

    pub fn get(&self, id: ReadingId) -> Option<&LoggedReading> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedReading> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 모든 기록을 공유 구성값 기준으로 평가한다. 배관 유동값은 한 번만 계산한다.
    pub fn evaluate(&self, config: &SystemConfiguration) -> Vec<(ReadingId, CalculationResult)> {
        let flow = PipeFlow::from_configuration(config);
        self.entries
            .iter()
            .map(|e| (e.id, evaluate_reading(config, &flow, &e.reading)))
            .collect()
    }
}

/// NaN/inf는 JSON에 null로 저장되어 슬롯을 읽을 수 없게 되므로 0으로 바꾼다.
fn finite_only(reading: MeasurementReading) -> MeasurementReading {
    let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
    MeasurementReading {
        motor_input_power_kw: clean(reading.motor_input_power_kw),
        flow_rate_m3_per_h: clean(reading.flow_rate_m3_per_h),
        gauge_pressure_psi: clean(reading.gauge_pressure_psi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_id_parses_with_or_without_hash() {
        assert_eq!("#7".parse::<ReadingId>().unwrap(), ReadingId(7));
        assert_eq!(" 12 ".parse::<ReadingId>().unwrap(), ReadingId(12));
        assert!("x".parse::<ReadingId>().is_err());
        assert_eq!(ReadingId(3).to_string(), "#3");
    }

    #[test]
    fn append_skips_ids_present_in_hand_edited_entries() {
        let json = r#"{"next_id":1,"entries":[{"id":5,"reading":{"motor_input_power_kw":1.0,"flow_rate_m3_per_h":2.0,"gauge_pressure_psi":3.0}}]}"#;
        let mut log: ReadingLog = serde_json::from_str(json).unwrap();
        let id = log.append(MeasurementReading::default());
        assert_eq!(id, ReadingId(6));
    }

    #[test]
    fn id_counter_at_u64_max_does_not_overflow() {
        let json = format!(
            r#"{{"next_id":1,"entries":[{{"id":{},"reading":{{"motor_input_power_kw":1.0,"flow_rate_m3_per_h":2.0,"gauge_pressure_psi":3.0}}}}]}}"#,
            u64::MAX
        );
        let mut log: ReadingLog = serde_json::from_str(&json).unwrap();
        let id = log.append(MeasurementReading::default());
        assert_eq!(id, ReadingId(u64::MAX));
        assert_eq!(log.next_id, u64::MAX);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn non_finite_values_are_stored_as_zero() {
        let mut log = ReadingLog::new();
        let id = log.append(MeasurementReading {
            motor_input_power_kw: f64::NAN,
            flow_rate_m3_per_h: 36.0,
            gauge_pressure_psi: f64::INFINITY,
        });
        let stored = log.get(id).unwrap().reading;
        assert_eq!(stored.motor_input_power_kw, 0.0);
        assert_eq!(stored.flow_rate_m3_per_h, 36.0);
        assert_eq!(stored.gauge_pressure_psi, 0.0);

        log.update(
            id,
            MeasurementReading {
                motor_input_power_kw: 10.0,
                flow_rate_m3_per_h: f64::NEG_INFINITY,
                gauge_pressure_psi: 20.0,
            },
        )
        .unwrap();
        assert_eq!(log.get(id).unwrap().reading.flow_rate_m3_per_h, 0.0);

        let json = serde_json::to_string(&log).unwrap();
        let restored: ReadingLog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, log);
    }
}
