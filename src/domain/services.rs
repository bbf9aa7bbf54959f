use crate::domain::model::{Rep, RepQuery, Zone};
use std::collections::HashMap;

/// 每個區間的 rep 數量，以 zone id 為鍵
pub type ZoneDistribution = HashMap<String, usize>;

/// 依輸入順序找第一個包含該速度的區間
pub fn find_zone_for_velocity(velocity: f64, zones: &[Zone]) -> Option<&Zone> {
    zones.iter().find(|zone| zone.contains_velocity(velocity))
}

/// 計算每個區間的 rep 數量。
///
/// 每個輸入區間都會出現在結果中 (沒有 rep 時為 0)。區間重疊時只算給
/// 最先列出的那個；不屬於任何區間的 rep 直接略過。
pub fn calculate_zone_distribution(reps: &[Rep], zones: &[Zone]) -> ZoneDistribution {
    let mut distribution: ZoneDistribution = zones
        .iter()
        .map(|zone| (zone.id().to_string(), 0))
        .collect();

    for rep in reps {
        if let Some(zone) = find_zone_for_velocity(rep.velocity(), zones) {
            *distribution.entry(zone.id().to_string()).or_insert(0) += 1;
        }
    }

    distribution
}

/// exercise / 日期條件 (不含分頁)
pub fn matches_criteria(rep: &Rep, query: &RepQuery) -> bool {
    if let Some(exercise_id) = &query.exercise_id {
        if rep.exercise_id() != exercise_id {
            return false;
        }
    }
    if let Some(start) = query.start_date {
        if rep.timestamp() < start {
            return false;
        }
    }
    if let Some(end) = query.end_date {
        if rep.timestamp() > end {
            return false;
        }
    }
    true
}

/// 先 offset 再 limit
pub fn paginate<T>(items: Vec<T>, query: &RepQuery) -> Vec<T> {
    let offset = query.offset.unwrap_or(0);
    let iter = items.into_iter().skip(offset);

    match query.limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

/// 篩選後再分頁，保留儲存層原本的順序 (不排序)
pub fn filter_reps(reps: &[Rep], query: &RepQuery) -> Vec<Rep> {
    let filtered: Vec<Rep> = reps
        .iter()
        .filter(|rep| matches_criteria(rep, query))
        .cloned()
        .collect();

    paginate(filtered, query)
}
