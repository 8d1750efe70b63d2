// Progress monitoring - 共有カウンタとステータス行の表示
// ワーカーは自分のスロットだけを書き、モニタが合計を読む

pub mod eta;

pub use eta::{format_hms, EtaEstimator, ProgressSnapshot};

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// ワーカーごとのスロットを持つ進捗カウンタ
///
/// 各スロットへの書き込みは担当ワーカーだけが行う単一ライタ構成。
/// モニタは読むだけで、値は単調に増えるため Relaxed で十分。
#[derive(Debug, Clone)]
pub struct ProgressCounters {
    slots: Arc<Vec<AtomicUsize>>,
}

impl ProgressCounters {
    pub fn new(workers: usize) -> Self {
        let slots = (0..workers).map(|_| AtomicUsize::new(0)).collect();
        Self {
            slots: Arc::new(slots),
        }
    }

    /// 担当スロットを 1 進める
    pub fn increment(&self, slot: usize) {
        self.slots[slot].fetch_add(1, Ordering::Relaxed);
    }

    /// 全スロットの合計
    pub fn total(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// ステータス行 1 行分を組み立てる
///
/// 先頭の `\r` で直前の行を上書きする。
fn render_status(snapshot: &ProgressSnapshot) -> String {
    let (cost_h, cost_m, cost_s) = format_hms(snapshot.cost_secs);
    let (eta_h, eta_m, eta_s) = format_hms(snapshot.eta_secs);
    format!(
        "\r  > {:.2}%({}/{}) | cost {:02}:{:02}:{:02} | eta {:02}:{:02}:{:02}",
        snapshot.percent,
        snapshot.done,
        snapshot.total,
        cost_h,
        cost_m,
        cost_s,
        eta_h,
        eta_m,
        eta_s
    )
}

/// 進捗モニタを起動する
///
/// 1 秒ごとにカウンタ合計を読んでステータス行を上書き表示し、
/// 全ファイル完了で終了する。ワーカーの異常終了でカウンタが
/// 総数に届かない場合に備えて、スーパーバイザからの停止通知でも
/// 終了する。どちらの経路でも最後に 1 回描画してから改行する。
pub fn spawn_monitor(
    counters: ProgressCounters,
    total_files: usize,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if total_files == 0 {
            return;
        }

        let start = Instant::now();
        let mut estimator = EtaEstimator::new();
        let mut ticker = tokio::time::interval(Duration::from_secs(1));

        loop {
            let stop = tokio::select! {
                biased;
                _ = shutdown.changed() => true,
                _ = ticker.tick() => false,
            };

            let done = counters.total();
            let snapshot = estimator.observe(done, total_files, start.elapsed().as_secs_f64());
            print!("{}", render_status(&snapshot));
            let _ = std::io::stdout().flush();

            if stop || done >= total_files {
                break;
            }
        }
        println!();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[test]
    fn test_counters_sum_across_slots() {
        let counters = ProgressCounters::new(3);
        assert_eq!(counters.len(), 3);
        assert_eq!(counters.total(), 0);

        counters.increment(0);
        counters.increment(0);
        counters.increment(2);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn test_counters_shared_through_clone() {
        let counters = ProgressCounters::new(2);
        let clone = counters.clone();

        clone.increment(1);
        assert_eq!(counters.total(), 1);
    }

    #[test]
    fn test_render_status_format() {
        let snapshot = ProgressSnapshot {
            done: 1,
            total: 4,
            percent: 25.0,
            cost_secs: 1.2,
            eta_secs: 3.9,
        };

        assert_eq!(
            render_status(&snapshot),
            "\r  > 25.00%(1/4) | cost 00:00:01 | eta 00:00:03"
        );
    }

    #[test]
    fn test_render_status_pads_time_fields() {
        let snapshot = ProgressSnapshot {
            done: 99,
            total: 100,
            percent: 99.0,
            cost_secs: 3661.0,
            eta_secs: 37.0,
        };

        assert_eq!(
            render_status(&snapshot),
            "\r  > 99.00%(99/100) | cost 01:01:01 | eta 00:00:37"
        );
    }

    #[tokio::test]
    async fn test_monitor_exits_when_all_files_done() {
        let counters = ProgressCounters::new(2);
        counters.increment(0);
        counters.increment(1);

        let (_tx, rx) = watch::channel(false);
        let handle = spawn_monitor(counters, 2, rx);

        // 初回ティックで完了を検出してすぐ終了する
        timeout(Duration::from_secs(5), handle)
            .await
            .expect("モニタが終了しませんでした")
            .unwrap();
    }

    #[tokio::test]
    async fn test_monitor_exits_on_shutdown_signal() {
        let counters = ProgressCounters::new(1);
        let (tx, rx) = watch::channel(false);

        // カウンタは総数に届かないが、停止通知で終了する
        let handle = spawn_monitor(counters, 10, rx);
        tx.send(true).unwrap();

        timeout(Duration::from_secs(5), handle)
            .await
            .expect("モニタが終了しませんでした")
            .unwrap();
    }

    #[tokio::test]
    async fn test_monitor_no_files_is_immediate() {
        let counters = ProgressCounters::new(1);
        let (_tx, rx) = watch::channel(false);

        let handle = spawn_monitor(counters, 0, rx);
        timeout(Duration::from_secs(5), handle)
            .await
            .expect("モニタが終了しませんでした")
            .unwrap();
    }
}
