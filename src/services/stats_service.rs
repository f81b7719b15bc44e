// src/services/stats_service.rs
use crate::{
    error::AppResult,
    models::{
        hostel::Hostel,
        stats::{BatchCount, DeptCount, HostelCount, HostelOccupancy, StatsSnapshot},
    },
    services::{hostel_service, student_service},
};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Joins per-hostel student counts against the full hostel list.
///
/// Every hostel appears exactly once, in the order given, even when the
/// grouping pass produced no row for it. Vacancy is floored at zero.
/// Counts for hostel ids not in `hostels` are dropped.
pub fn hostel_occupancy(hostels: &[Hostel], counts: &[HostelCount]) -> Vec<HostelOccupancy> {
    let counts_by_hostel: HashMap<&str, i64> = counts
        .iter()
        .map(|c| (c.hostel_id.as_str(), c.count))
        .collect();

    hostels
        .iter()
        .map(|h| {
            let occupied = counts_by_hostel.get(h.id.as_str()).copied().unwrap_or(0);
            let capacity = h.capacity.max(0);
            HostelOccupancy {
                id: h.id.clone(),
                name: h.name.clone(),
                capacity,
                occupied,
                vacant: (capacity - occupied).max(0),
            }
        })
        .collect()
}

/// Builds the stats snapshot. Queries run one after another without a
/// shared transaction, so concurrent writes may skew the parts slightly.
pub async fn get_stats(db_pool: &SqlitePool) -> AppResult<StatsSnapshot> {
    tracing::debug!("Computing stats snapshot...");

    let total_students = student_service::count_students(db_pool).await?;

    let hostels = hostel_service::find_all_hostels(db_pool).await?;

    let counts = sqlx::query_as::<_, HostelCount>(
        "SELECT hostel_id, COUNT(*) AS count FROM students GROUP BY hostel_id",
    )
    .fetch_all(db_pool)
    .await?;

    let by_dept = sqlx::query_as::<_, DeptCount>(
        "SELECT dept, COUNT(*) AS count FROM students GROUP BY dept ORDER BY count DESC, dept ASC",
    )
    .fetch_all(db_pool)
    .await?;

    let by_batch = sqlx::query_as::<_, BatchCount>(
        "SELECT batch, COUNT(*) AS count FROM students GROUP BY batch ORDER BY batch ASC",
    )
    .fetch_all(db_pool)
    .await?;

    let snapshot = StatsSnapshot {
        total_students,
        hostels: hostel_occupancy(&hostels, &counts),
        by_dept,
        by_batch,
    };
    tracing::debug!(
        "Stats: {} students across {} hostels.",
        snapshot.total_students,
        snapshot.hostels.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hostel(id: &str, name: &str, capacity: i64) -> Hostel {
        Hostel { id: id.into(), name: name.into(), capacity }
    }

    fn count(hostel_id: &str, count: i64) -> HostelCount {
        HostelCount { hostel_id: hostel_id.into(), count }
    }

    #[test]
    fn hostels_without_students_are_still_reported() {
        let hostels = [hostel("a", "A", 10), hostel("b", "B", 5)];
        let result = hostel_occupancy(&hostels, &[count("a", 3)]);

        let summary: Vec<(&str, i64, i64)> = result
            .iter()
            .map(|h| (h.name.as_str(), h.occupied, h.vacant))
            .collect();
        assert_eq!(summary, vec![("A", 3, 7), ("B", 0, 5)]);
    }

    #[test]
    fn over_capacity_clamps_vacancy_to_zero() {
        let result = hostel_occupancy(&[hostel("a", "A", 2)], &[count("a", 5)]);
        assert_eq!(result[0].occupied, 5);
        assert_eq!(result[0].vacant, 0);
    }

    #[test]
    fn occupied_plus_vacant_equals_capacity_when_not_full() {
        let hostels = [hostel("a", "A", 8), hostel("b", "B", 0), hostel("c", "C", 4)];
        let counts = [count("a", 8), count("c", 1)];
        for h in hostel_occupancy(&hostels, &counts) {
            assert!(h.occupied <= h.capacity);
            assert_eq!(h.occupied + h.vacant, h.capacity);
        }
    }

    #[test]
    fn counts_for_unknown_hostels_are_ignored() {
        let result = hostel_occupancy(&[hostel("a", "A", 3)], &[count("ghost", 9)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].occupied, 0);
    }
}
