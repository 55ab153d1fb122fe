//! Top-sender ranking over the peer table.

use crate::config::TOP_SENDERS;
use crate::stats::PeerTable;
use heapless::Vec;

/// Slot indices of the `K` peers with the most hellos, best first.
///
/// Single pass over the table with a `K`-entry insertion list. Ties keep
/// the peer that entered the table first, because a newcomer only displaces
/// a holder it strictly beats. Peers without any hello are skipped.
pub fn top_k<const K: usize>(table: &PeerTable) -> Vec<usize, K> {
    let mut top: [Option<usize>; K] = [None; K];

    for (index, stat) in table.iter() {
        if stat.hello_count == 0 {
            continue;
        }

        for j in 0..K {
            let beats_holder = match top[j] {
                None => true,
                Some(held) => table
                    .get(held)
                    .map_or(true, |h| stat.hello_count > h.hello_count),
            };
            if !beats_holder {
                continue;
            }

            // Move lower-ranked holders down; the last one falls off.
            top.copy_within(j..K - 1, j + 1);
            top[j] = Some(index);
            break;
        }
    }

    top.iter().flatten().copied().collect()
}

/// The leaderboard shown on the statistics screen.
pub fn top_senders(table: &PeerTable) -> Vec<usize, TOP_SENDERS> {
    top_k::<TOP_SENDERS>(table)
}
