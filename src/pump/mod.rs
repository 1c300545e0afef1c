//! 펌프 효율 계산 모듈 모음.
//! 수력 계산 엔진, 피팅 손실계수, 입력 해석, 측정 기록, 곡선/표시/내보내기로 구성한다.

pub mod curve;
pub mod format;
pub mod hydraulics;
pub mod input;
pub mod piping;
pub mod rating;
pub mod readings;
pub mod report;

pub use hydraulics::*;
pub use input::{parse_number, FormField, PumpForm};
pub use piping::{FittingKind, LossCoefficientInputs};
pub use readings::{LoggedReading, ReadingId, ReadingLog, ReadingLogError};
