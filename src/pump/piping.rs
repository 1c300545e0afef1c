use serde::{Deserialize, Serialize};

/// 배관망 피팅 종류. 각 피팅은 고정된 손실계수 상수를 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FittingKind {
    /// K1: 90° 엘보
    Elbow90,
    /// K2: 게이트 밸브(완전 개방)
    GateValveOpen,
    /// K3: 풋 밸브
    FootValve,
    /// K4: 스윙 체크 밸브
    SwingCheckValve,
    /// K5: 입구(날카로운 모서리)
    SharpEntrance,
    /// K6: 출구
    Exit,
}

impl FittingKind {
    /// K1..K6 순서의 전체 피팅 목록.
    pub const ALL: [FittingKind; 6] = [
        FittingKind::Elbow90,
        FittingKind::GateValveOpen,
        FittingKind::FootValve,
        FittingKind::SwingCheckValve,
        FittingKind::SharpEntrance,
        FittingKind::Exit,
    ];

    /// 피팅별 고정 손실계수 상수.
    pub fn constant(self) -> f64 {
        match self {
            FittingKind::Elbow90 => 0.6,
            FittingKind::GateValveOpen => 0.15,
            FittingKind::FootValve => 4.0,
            FittingKind::SwingCheckValve => 2.0,
            FittingKind::SharpEntrance => 0.5,
            FittingKind::Exit => 1.0,
        }
    }

    /// 0부터 시작하는 K 인덱스(K1=0).
    pub fn index(self) -> usize {
        match self {
            FittingKind::Elbow90 => 0,
            FittingKind::GateValveOpen => 1,
            FittingKind::FootValve => 2,
            FittingKind::SwingCheckValve => 3,
            FittingKind::SharpEntrance => 4,
            FittingKind::Exit => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FittingKind::Elbow90 => "K1 (90° elbow)",
            FittingKind::GateValveOpen => "K2 (gate valve)(open)",
            FittingKind::FootValve => "K3 (foot valve)",
            FittingKind::SwingCheckValve => "K4 (swing check valve)",
            FittingKind::SharpEntrance => "K5 Entrance (sharp)",
            FittingKind::Exit => "K6 (exit)",
        }
    }
}

/// 사용자가 입력한 피팅 배수 k1..k6 (무차원).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LossCoefficientInputs {
    pub k: [f64; 6],
}

impl LossCoefficientInputs {
    pub fn new(k: [f64; 6]) -> Self {
        Self { k }
    }

    /// 해당 피팅의 순 손실계수 = 고정 상수 × 사용자 배수.
    pub fn net_coefficient(&self, kind: FittingKind) -> f64 {
        kind.constant() * self.k[kind.index()]
    }

    /// ΣK = Σ (상수_i × k_i), K1부터 K6 순서로 합산한다.
    pub fn total(&self) -> f64 {
        FittingKind::ALL
            .iter()
            .map(|kind| self.net_coefficient(*kind))
            .sum()
    }
}
