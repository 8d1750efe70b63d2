// ETA estimation - スループット外挿による残り時間の見積もり

/// 進捗ポーリング 1 回分のスナップショット
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub done: usize,
    pub total: usize,
    pub percent: f64,
    pub cost_secs: f64,
    pub eta_secs: f64,
}

/// 残り時間の見積もり器
///
/// ポーリングごとに (完了数, 総数, 開始からの経過秒) を与える。
/// 進捗があれば平均スループットから残り時間を外挿し直し、
/// 進捗がなければ前回の見積もりを経過分だけ減らす。
/// 見積もりが負になったら 0 に丸める。
///
/// 壁時計から切り離した純粋な状態機械なので、停滞時の減衰は
/// 合成した経過秒列でそのままテストできる。
#[derive(Debug, Default)]
pub struct EtaEstimator {
    finished: usize,
    cost_secs: f64,
    eta_secs: f64,
}

impl EtaEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, done: usize, total: usize, elapsed_secs: f64) -> ProgressSnapshot {
        if done == self.finished {
            // 進捗なし: 前回の見積もりを経過分だけ減らす
            self.eta_secs -= elapsed_secs - self.cost_secs;
        }
        self.cost_secs = elapsed_secs;
        if done > self.finished {
            self.finished = done;
            self.eta_secs = elapsed_secs / done as f64 * (total - done) as f64;
        }
        if self.eta_secs < 0.0 {
            self.eta_secs = 0.0;
        }

        ProgressSnapshot {
            done,
            total,
            percent: if total == 0 {
                100.0
            } else {
                done as f64 / total as f64 * 100.0
            },
            cost_secs: elapsed_secs,
            eta_secs: self.eta_secs,
        }
    }
}

/// 秒を (時, 分, 秒) に分解する（小数点以下切り捨て）
pub fn format_hms(secs: f64) -> (u64, u64, u64) {
    let total = secs.max(0.0) as u64;
    (total / 3600, total % 3600 / 60, total % 60)
}
