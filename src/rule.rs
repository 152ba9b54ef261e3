use serde::{Deserialize, Serialize};

/// Scoring rule switches that differ between common rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringRule {
    /// All simples also counts on an open hand (kuitan).
    pub open_tanyao: bool,
    /// 13 or more counted han pays as a yakuman instead of sanbaiman.
    pub kazoe_yakuman: bool,

    pub double_yakuman_kokushi_13: bool,
    pub double_yakuman_suuankou_tanki: bool,
    pub double_yakuman_junsei_chuuren: bool,
    pub double_yakuman_daisuushi: bool,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringRule {
    pub fn standard() -> Self {
        Self {
            open_tanyao: true,
            kazoe_yakuman: true,

            double_yakuman_kokushi_13: false,
            double_yakuman_suuankou_tanki: false,
            double_yakuman_junsei_chuuren: false,
            double_yakuman_daisuushi: false,
        }
    }

    pub fn mjsoul() -> Self {
        Self {
            open_tanyao: true,
            kazoe_yakuman: true,

            double_yakuman_kokushi_13: true,
            double_yakuman_suuankou_tanki: true,
            double_yakuman_junsei_chuuren: true,
            double_yakuman_daisuushi: true,
        }
    }
}
