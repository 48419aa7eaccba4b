//! 进度计算
//!
//! 两种互相独立的进度：
//! - 片段进度：实际文本中的片段数 / 目标
//! - 认捐进度：各认捐自报 amount 之和 / 目标
//!
//! 当认捐自报数量与实际片段数不一致时，两者会出现分歧，这里不做调和。

use serde::Serialize;

use super::content_segmenter::segment_count;
use super::project::{ContentType, Pledge, Project};

/// 百分比上限
pub const MAX_PERCENTAGE: f64 = 100.0;

fn clamped_percentage(count: u64, goal: u32) -> f64 {
    (count as f64 / goal as f64 * 100.0).min(MAX_PERCENTAGE)
}

/// 按实际片段计算完成百分比
///
/// 内容缺失/为空或目标为 0 时返回 0；超出目标的部分被截断到 100。
pub fn calculate_progress(content: Option<&str>, content_type: ContentType, goal: u32) -> f64 {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return 0.0;
    };
    if goal == 0 {
        return 0.0;
    }

    clamped_percentage(segment_count(content, content_type) as u64, goal)
}

/// 按认捐自报数量计算完成百分比
pub fn calculate_pledge_progress(pledges: &[Pledge], goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }

    let total: u64 = pledges.iter().map(|p| u64::from(p.amount)).sum();
    clamped_percentage(total, goal)
}

/// 项目进度汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub content_type: ContentType,
    pub goal: u32,
    /// 账本中的实际片段数
    pub segment_count: usize,
    pub contribution_count: usize,
    /// 片段进度（开篇 + 全部认捐正文）
    pub segment_percentage: f64,
    /// 认捐自报进度
    pub pledge_percentage: f64,
}

impl ProgressReport {
    pub fn for_project(project: &Project) -> Self {
        let ledger = project.ledger();
        let full_text = ledger.full_text();

        Self {
            content_type: project.content_type,
            goal: project.goal,
            segment_count: ledger.total_segments(),
            contribution_count: project.contribution_count(),
            segment_percentage: calculate_progress(
                Some(&full_text),
                project.content_type,
                project.goal,
            ),
            pledge_percentage: calculate_pledge_progress(&project.pledges, project.goal),
        }
    }

    pub fn label(&self) -> &'static str {
        self.content_type.label()
    }

    /// 两种进度是否不一致
    pub fn is_divergent(&self) -> bool {
        (self.segment_percentage - self.pledge_percentage).abs() > f64::EPSILON
    }

    /// 例如 `2 contributions • 50% of 10 verses`
    pub fn summary(&self) -> String {
        format!(
            "{} contributions • {}% of {} {}",
            self.contribution_count,
            self.pledge_percentage.round() as u32,
            self.goal,
            self.label().to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ProjectId, UserId};

    fn pledges(amounts: &[u32]) -> Vec<Pledge> {
        amounts.iter().map(|a| Pledge::new(*a, "text")).collect()
    }

    #[test]
    fn test_story_progress_counts_paragraphs() {
        let content = "First.\n\nSecond.\nStill second.\n\n\nThird.";
        assert_eq!(calculate_progress(Some(content), ContentType::Story, 6), 50.0);
        assert_eq!(calculate_progress(Some(content), ContentType::Story, 4), 75.0);
    }

    #[test]
    fn test_poem_progress_counts_lines() {
        let content = "a\nb\n\nc\nd";
        assert_eq!(calculate_progress(Some(content), ContentType::Poem, 8), 50.0);
    }

    #[test]
    fn test_progress_matches_formula_across_goals() {
        let content = "1\n\n2\n\n3";
        for goal in 1..=10u32 {
            let expected = (3.0 / goal as f64 * 100.0).min(100.0);
            assert_eq!(calculate_progress(Some(content), ContentType::Story, goal), expected);
        }
    }

    #[test]
    fn test_progress_clamps_overshoot() {
        let content = "1\n2\n3\n4\n5";
        assert_eq!(calculate_progress(Some(content), ContentType::Poem, 2), 100.0);
    }

    #[test]
    fn test_progress_zero_for_missing_content_or_goal() {
        assert_eq!(calculate_progress(None, ContentType::Story, 5), 0.0);
        assert_eq!(calculate_progress(Some(""), ContentType::Poem, 5), 0.0);
        assert_eq!(calculate_progress(Some("a\n\nb"), ContentType::Story, 0), 0.0);
        assert_eq!(calculate_progress(Some("   \n  "), ContentType::Poem, 3), 0.0);
    }

    #[test]
    fn test_pledge_progress_sums_amounts() {
        assert_eq!(calculate_pledge_progress(&pledges(&[2, 3]), 10), 50.0);
    }

    #[test]
    fn test_pledge_progress_clamps() {
        assert_eq!(calculate_pledge_progress(&pledges(&[8, 8]), 10), 100.0);
    }

    #[test]
    fn test_pledge_progress_zero_goal_or_no_pledges() {
        assert_eq!(calculate_pledge_progress(&pledges(&[3]), 0), 0.0);
        assert_eq!(calculate_pledge_progress(&[], 10), 0.0);
    }

    #[test]
    fn test_report_summary() {
        let mut project = Project::new(
            ProjectId::new(3),
            "Sea",
            ContentType::Poem,
            3,
            "Waves",
            UserId::new(1),
        );
        project.pledges = pledges(&[1]);

        let report = project.progress();
        assert_eq!(report.segment_count, 2);
        assert_eq!(report.summary(), "1 contributions • 33% of 3 verses");
    }

    #[test]
    fn test_declared_amount_diverges_from_actual_segments() {
        // 自报 5 段，实际只写了 1 段
        let mut project = Project::new(
            ProjectId::new(4),
            "Drift",
            ContentType::Story,
            10,
            "Opening.",
            UserId::new(1),
        );
        project.pledges = vec![Pledge::new(5, "Only one paragraph.")];

        let report = project.progress();
        assert_eq!(report.segment_percentage, 20.0);
        assert_eq!(report.pledge_percentage, 50.0);
        assert!(report.is_divergent());
    }
}
