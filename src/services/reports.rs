//! Report aggregation.
//!
//! Manager-only analytics over the request set. Every figure is recomputed
//! from scratch on each call; the volumes involved make incremental
//! counters unnecessary. The aggregation itself is pure over in-memory
//! rows, with the service only fetching them.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::{
    api::reports::{
        EquipmentInsights, EquipmentStat, ReportRange, RequestsOverview, TeamPerformance,
        TechnicianWorkload,
    },
    error::AppResult,
    models::{
        category::EquipmentCategory,
        equipment::Equipment,
        request::MaintenanceRequest,
        team::Team,
        user::{Role, User},
    },
    permissions::Capability,
    repository::Repository,
};

/// Open requests older than this are counted as overdue
const OVERDUE_AFTER_DAYS: i64 = 7;

/// Apply the optional date window. Only a fully-specified window filters;
/// a lone bound is ignored.
pub fn filter_by_range(
    requests: Vec<MaintenanceRequest>,
    range: &ReportRange,
) -> Vec<MaintenanceRequest> {
    match (range.start_date, range.end_date) {
        (Some(start), Some(end)) => requests
            .into_iter()
            .filter(|r| r.created_at >= start && r.created_at <= end)
            .collect(),
        _ => requests,
    }
}

fn percentage(part: usize, total: usize) -> i64 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as i64
    }
}

/// Mean of (updated_at - created_at) over completed requests, truncated to
/// whole hours. Zero when nothing is completed.
fn mean_hours(completed: &[&MaintenanceRequest]) -> i64 {
    if completed.is_empty() {
        return 0;
    }
    let total_seconds: i64 = completed
        .iter()
        .map(|r| (r.updated_at - r.created_at).num_seconds())
        .sum();
    total_seconds / completed.len() as i64 / 3600
}

/// System-health overview: totals, open/closed split, overdue count and
/// the corrective/preventive mix.
pub fn requests_overview(
    requests: &[MaintenanceRequest],
    now: DateTime<Utc>,
) -> RequestsOverview {
    let total = requests.len();
    let open = requests.iter().filter(|r| r.status.is_open()).count();
    let closed = requests.iter().filter(|r| r.status.is_closed()).count();
    let corrective = requests
        .iter()
        .filter(|r| r.request_type == crate::models::request::RequestType::Corrective)
        .count();
    let preventive = total - corrective;

    let overdue_cutoff = now - Duration::days(OVERDUE_AFTER_DAYS);
    let overdue = requests
        .iter()
        .filter(|r| r.status.is_open() && r.created_at < overdue_cutoff)
        .count();

    RequestsOverview {
        total: total as i64,
        open: open as i64,
        closed: closed as i64,
        overdue: overdue as i64,
        corrective: corrective as i64,
        preventive: preventive as i64,
        corrective_percentage: percentage(corrective, total),
        preventive_percentage: percentage(preventive, total),
    }
}

/// Per-team totals and mean resolution time, busiest teams first
pub fn team_performance(
    teams: &[Team],
    requests: &[MaintenanceRequest],
) -> Vec<TeamPerformance> {
    let mut stats: Vec<TeamPerformance> = teams
        .iter()
        .map(|team| {
            let team_requests: Vec<&MaintenanceRequest> =
                requests.iter().filter(|r| r.team_id == team.id).collect();
            let completed: Vec<&MaintenanceRequest> = team_requests
                .iter()
                .copied()
                .filter(|r| r.status.is_closed())
                .collect();
            let open = team_requests.iter().filter(|r| r.status.is_open()).count();

            TeamPerformance {
                team_id: team.id,
                team_name: team.name.clone(),
                total_requests: team_requests.len() as i64,
                completed: completed.len() as i64,
                open: open as i64,
                avg_resolution_time_hours: mean_hours(&completed),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_requests.cmp(&a.total_requests));
    stats
}

/// Per-technician assignment load and mean repair time, most productive
/// first
pub fn technician_workload(
    technicians: &[User],
    requests: &[MaintenanceRequest],
) -> Vec<TechnicianWorkload> {
    let mut stats: Vec<TechnicianWorkload> = technicians
        .iter()
        .filter(|u| u.role == Role::Technician)
        .map(|tech| {
            let tech_requests: Vec<&MaintenanceRequest> = requests
                .iter()
                .filter(|r| r.assigned_to == Some(tech.id))
                .collect();
            let completed: Vec<&MaintenanceRequest> = tech_requests
                .iter()
                .copied()
                .filter(|r| r.status.is_closed())
                .collect();
            let in_progress = tech_requests
                .iter()
                .filter(|r| r.status == crate::models::request::RequestStatus::InProgress)
                .count();
            let currently_assigned = tech_requests.iter().filter(|r| r.status.is_open()).count();

            TechnicianWorkload {
                technician_id: tech.id,
                technician_name: tech.name.clone(),
                team_id: tech.team_id,
                total_assigned: tech_requests.len() as i64,
                completed: completed.len() as i64,
                in_progress: in_progress as i64,
                currently_assigned: currently_assigned as i64,
                avg_repair_time_hours: mean_hours(&completed),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.completed.cmp(&a.completed));
    stats
}

/// Per-equipment failure counts with category lookup, most frequently
/// failing first, plus a per-category breakdown
pub fn equipment_insights(
    equipment: &[Equipment],
    categories: &[EquipmentCategory],
    requests: &[MaintenanceRequest],
) -> EquipmentInsights {
    let category_names: HashMap<i32, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut stats: Vec<EquipmentStat> = equipment
        .iter()
        .map(|eq| {
            let eq_requests: Vec<&MaintenanceRequest> =
                requests.iter().filter(|r| r.equipment_id == eq.id).collect();
            let scrapped = eq_requests
                .iter()
                .filter(|r| r.status == crate::models::request::RequestStatus::Scrap)
                .count();

            EquipmentStat {
                equipment_id: eq.id,
                equipment_name: eq.name.clone(),
                category: category_names
                    .get(&eq.category_id)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Uncategorized".to_string()),
                department: eq.department.clone(),
                total_requests: eq_requests.len() as i64,
                scrapped_count: scrapped as i64,
                is_scrapped: eq.is_scrapped,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_requests.cmp(&a.total_requests));

    let mut category_breakdown: BTreeMap<String, i64> = BTreeMap::new();
    for stat in &stats {
        *category_breakdown.entry(stat.category.clone()).or_insert(0) += stat.total_requests;
    }

    EquipmentInsights {
        total_equipment: equipment.len() as i64,
        total_scrapped: equipment.iter().filter(|e| e.is_scrapped).count() as i64,
        equipment_stats: stats,
        category_breakdown,
    }
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    async fn filtered_requests(&self, range: &ReportRange) -> AppResult<Vec<MaintenanceRequest>> {
        let requests = self.repository.requests.list_all().await?;
        Ok(filter_by_range(requests, range))
    }

    pub async fn overview(&self, actor: &User, range: ReportRange) -> AppResult<RequestsOverview> {
        actor.role.require(Capability::ViewReports)?;
        let requests = self.filtered_requests(&range).await?;
        Ok(requests_overview(&requests, Utc::now()))
    }

    pub async fn team_performance(
        &self,
        actor: &User,
        range: ReportRange,
    ) -> AppResult<Vec<TeamPerformance>> {
        actor.role.require(Capability::ViewReports)?;
        let teams = self.repository.teams.list().await?;
        let requests = self.filtered_requests(&range).await?;
        Ok(team_performance(&teams, &requests))
    }

    pub async fn technician_workload(
        &self,
        actor: &User,
        range: ReportRange,
    ) -> AppResult<Vec<TechnicianWorkload>> {
        actor.role.require(Capability::ViewReports)?;
        let technicians = self.repository.users.list_by_role(Role::Technician).await?;
        let requests = self.filtered_requests(&range).await?;
        Ok(technician_workload(&technicians, &requests))
    }

    pub async fn equipment_insights(
        &self,
        actor: &User,
        range: ReportRange,
    ) -> AppResult<EquipmentInsights> {
        actor.role.require(Capability::ViewReports)?;
        let equipment = self.repository.equipment.list().await?;
        let categories = self.repository.categories.list().await?;
        let requests = self.filtered_requests(&range).await?;
        Ok(equipment_insights(&equipment, &categories, &requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::{RequestPriority, RequestStatus, RequestType};
    use chrono::TimeZone;

    fn request(
        id: i32,
        request_type: RequestType,
        status: RequestStatus,
        team_id: i32,
        equipment_id: i32,
        assigned_to: Option<i32>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> MaintenanceRequest {
        MaintenanceRequest {
            id,
            subject: format!("Request {}", id),
            request_type,
            priority: RequestPriority::Medium,
            equipment_id,
            team_id,
            status,
            assigned_to,
            scheduled_date: None,
            duration_hours: None,
            created_by: 1,
            created_at,
            updated_at,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn overview_percentages_are_zero_for_empty_set() {
        let overview = requests_overview(&[], Utc::now());
        assert_eq!(overview.total, 0);
        assert_eq!(overview.corrective_percentage, 0);
        assert_eq!(overview.preventive_percentage, 0);
        assert_eq!(overview.overdue, 0);
    }

    #[test]
    fn overview_counts_and_percentages() {
        let now = at(20, 12);
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(19, 0), at(19, 0)),
            request(2, RequestType::Corrective, RequestStatus::Repaired, 1, 1, None, at(18, 0), at(19, 0)),
            request(3, RequestType::Preventive, RequestStatus::InProgress, 1, 2, None, at(17, 0), at(18, 0)),
        ];
        let overview = requests_overview(&requests, now);
        assert_eq!(overview.total, 3);
        assert_eq!(overview.open, 2);
        assert_eq!(overview.closed, 1);
        assert_eq!(overview.corrective, 2);
        assert_eq!(overview.preventive, 1);
        // 2/3 rounds to 67, 1/3 rounds to 33
        assert_eq!(overview.corrective_percentage, 67);
        assert_eq!(overview.preventive_percentage, 33);
    }

    #[test]
    fn overdue_counts_only_open_requests_older_than_seven_days() {
        let now = at(20, 12);
        let requests = vec![
            // open, 10 days old: overdue
            request(1, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(10, 12), at(10, 12)),
            // open, 2 days old: not overdue
            request(2, RequestType::Corrective, RequestStatus::InProgress, 1, 1, None, at(18, 12), at(18, 12)),
            // closed, 10 days old: not overdue
            request(3, RequestType::Corrective, RequestStatus::Repaired, 1, 1, None, at(10, 12), at(11, 12)),
        ];
        let overview = requests_overview(&requests, now);
        assert_eq!(overview.overdue, 1);
    }

    #[test]
    fn mean_resolution_hours_truncate() {
        let team = Team {
            id: 1,
            name: "IT".into(),
            description: None,
            created_at: at(1, 0),
        };
        // Two completed requests taking 5h and 2h: mean 3.5h truncates to 3
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::Repaired, 1, 1, None, at(10, 0), at(10, 5)),
            request(2, RequestType::Corrective, RequestStatus::Scrap, 1, 1, None, at(11, 0), at(11, 2)),
        ];
        let stats = team_performance(&[team], &requests);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].completed, 2);
        assert_eq!(stats[0].avg_resolution_time_hours, 3);
    }

    #[test]
    fn team_performance_sorted_by_total_and_zero_mean_without_completions() {
        let teams = vec![
            Team { id: 1, name: "IT".into(), description: None, created_at: at(1, 0) },
            Team { id: 2, name: "Mechanics".into(), description: None, created_at: at(1, 0) },
        ];
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::New, 2, 1, None, at(10, 0), at(10, 0)),
            request(2, RequestType::Corrective, RequestStatus::New, 2, 1, None, at(10, 0), at(10, 0)),
            request(3, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(10, 0), at(10, 0)),
        ];
        let stats = team_performance(&teams, &requests);
        assert_eq!(stats[0].team_name, "Mechanics");
        assert_eq!(stats[0].total_requests, 2);
        assert_eq!(stats[0].avg_resolution_time_hours, 0);
        assert_eq!(stats[1].team_name, "IT");
    }

    #[test]
    fn technician_workload_ignores_non_technicians() {
        let users = vec![
            User {
                id: 1,
                auth_id: "a".into(),
                name: "Tech".into(),
                email: "t@x.c".into(),
                role: Role::Technician,
                team_id: Some(1),
                created_at: at(1, 0),
            },
            User {
                id: 2,
                auth_id: "b".into(),
                name: "Boss".into(),
                email: "b@x.c".into(),
                role: Role::Manager,
                team_id: None,
                created_at: at(1, 0),
            },
        ];
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::InProgress, 1, 1, Some(1), at(10, 0), at(10, 1)),
            request(2, RequestType::Corrective, RequestStatus::Repaired, 1, 1, Some(1), at(10, 0), at(10, 4)),
            request(3, RequestType::Corrective, RequestStatus::Repaired, 1, 1, Some(2), at(10, 0), at(10, 4)),
        ];
        let stats = technician_workload(&users, &requests);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].technician_id, 1);
        assert_eq!(stats[0].total_assigned, 2);
        assert_eq!(stats[0].in_progress, 1);
        assert_eq!(stats[0].currently_assigned, 1);
        assert_eq!(stats[0].completed, 1);
        assert_eq!(stats[0].avg_repair_time_hours, 4);
    }

    #[test]
    fn equipment_insights_sorting_and_category_fallback() {
        let categories = vec![EquipmentCategory {
            id: 1,
            name: "Computers".into(),
            company: "My Company".into(),
            responsible_user_id: None,
            created_at: at(1, 0),
        }];
        let make_eq = |id: i32, category_id: i32, is_scrapped: bool| Equipment {
            id,
            name: format!("Equipment {}", id),
            category_id,
            company: "My Company".into(),
            department: "IT".into(),
            serial_number: None,
            used_by_employee: None,
            used_in_location: None,
            technician_id: None,
            maintenance_team_id: 1,
            assigned_date: None,
            description: None,
            is_scrapped,
            created_at: at(1, 0),
        };
        let equipment = vec![make_eq(1, 1, false), make_eq(2, 99, true)];
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::Scrap, 1, 2, None, at(10, 0), at(10, 1)),
            request(2, RequestType::Corrective, RequestStatus::New, 1, 2, None, at(10, 0), at(10, 0)),
            request(3, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(10, 0), at(10, 0)),
        ];

        let insights = equipment_insights(&equipment, &categories, &requests);
        assert_eq!(insights.total_equipment, 2);
        assert_eq!(insights.total_scrapped, 1);
        // Equipment 2 fails more often and sorts first, with unknown category
        assert_eq!(insights.equipment_stats[0].equipment_id, 2);
        assert_eq!(insights.equipment_stats[0].category, "Uncategorized");
        assert_eq!(insights.equipment_stats[0].scrapped_count, 1);
        assert_eq!(insights.equipment_stats[1].category, "Computers");
        assert_eq!(insights.category_breakdown["Uncategorized"], 2);
        assert_eq!(insights.category_breakdown["Computers"], 1);
    }

    #[test]
    fn range_filter_needs_both_bounds() {
        let requests = vec![
            request(1, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(5, 0), at(5, 0)),
            request(2, RequestType::Corrective, RequestStatus::New, 1, 1, None, at(15, 0), at(15, 0)),
        ];

        let open_range = ReportRange {
            start_date: Some(at(10, 0)),
            end_date: None,
        };
        assert_eq!(filter_by_range(requests.clone(), &open_range).len(), 2);

        let full_range = ReportRange {
            start_date: Some(at(10, 0)),
            end_date: Some(at(20, 0)),
        };
        let filtered = filter_by_range(requests, &full_range);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }
}
