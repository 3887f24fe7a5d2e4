// Average-linkage agglomerative clustering with a distance cutoff.
//
// Bottom-up UPGMA over a precomputed distance matrix: start from
// singletons, repeatedly merge the closest pair, stop once the closest
// remaining pair sits above the cutoff. After a merge the distances to
// every other cluster follow the average-linkage identity
// d(a∪b, c) = (|a|·d(a,c) + |b|·d(b,c)) / (|a| + |b|), so nothing is
// recomputed from the original vectors. There is no target cluster
// count anywhere — the cutoff alone decides granularity.

/// Partition items into clusters, merging while the minimum
/// inter-cluster distance is at or below `threshold`.
///
/// `distances` is a full symmetric matrix. Returns clusters with members
/// in ascending item order, clusters ordered by their first member.
/// Ties on the minimum distance resolve to the lowest (i, j) pair, so
/// the merge sequence is deterministic.
pub fn average_linkage_clusters(distances: &[Vec<f64>], threshold: f64) -> Vec<Vec<usize>> {
    let n = distances.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![vec![0]];
    }

    let mut dist: Vec<Vec<f64>> = distances.to_vec();
    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut active: Vec<bool> = vec![true; n];

    loop {
        // Closest active pair; strict < keeps the lowest (i, j) on ties.
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !active[j] {
                    continue;
                }
                let d = dist[i][j];
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }
        let (i, j, d) = match best {
            Some(found) => found,
            None => break,
        };
        if d > threshold {
            break;
        }

        let (si, sj) = (members[i].len() as f64, members[j].len() as f64);
        for k in 0..n {
            if !active[k] || k == i || k == j {
                continue;
            }
            let merged = (si * dist[i][k] + sj * dist[j][k]) / (si + sj);
            dist[i][k] = merged;
            dist[k][i] = merged;
        }
        let moved = std::mem::take(&mut members[j]);
        members[i].extend(moved);
        active[j] = false;
    }

    let mut clusters: Vec<Vec<usize>> = (0..n)
        .filter(|&i| active[i])
        .map(|i| {
            let mut group = members[i].clone();
            group.sort_unstable();
            group
        })
        .collect();
    clusters.sort_by_key(|group| group[0]);
    clusters
}
