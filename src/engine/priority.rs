// ==========================================
// 养护作业优先级系统 - 优先级排序引擎
// ==========================================
// 职责: 为已完成能力判定的作业分配优先级数字并派生输出标志
// 输入: 已筛选 + 已判定能力的作业列表
// 输出: 附带 priority / cannot_do_flag / capability_check_flag 的作业列表
//       （保持输入顺序,展示顺序由导出层决定）
// ==========================================
// 排序规则:
// 1) 不可自营的作业 priority = -1
// 2) 类别优先: HAZARD > REPAIR > SURVEY
// 3) 同类别内: 到期时间越早越优先
// 4) 类别 + 到期时间完全相同 → 同一优先级（同级只占一个名次）
// ==========================================

use crate::domain::job::{PrioritizedJob, ResolvedJob};
use crate::domain::types::TieGranularity;
use chrono::NaiveDateTime;
use tracing::info;


/// 不可自营作业的优先级
pub const CANNOT_DO_PRIORITY: i32 = -1;

/// 复合排序键: (类别等级, 到期时间)
///
/// 到期时间已按同级粒度截断,键相等即同级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    pub category_rank: u8,
    pub due: NaiveDateTime,
}

// ==========================================
// PriorityRanker - 优先级排序引擎
// ==========================================
pub struct PriorityRanker {
    granularity: TieGranularity,
}

impl PriorityRanker {
    pub fn new(granularity: TieGranularity) -> Self {
        Self { granularity }
    }

    /// 计算作业的复合排序键
    pub fn rank_key(&self, job: &ResolvedJob) -> RankKey {
        let due = match self.granularity {
            TieGranularity::Exact => job.due_at,
            TieGranularity::Day => job
                .due_at
                .date()
                .and_hms_opt(0, 0, 0)
                .unwrap_or(job.due_at),
        };
        RankKey {
            category_rank: job.job.category.rank(),
            due,
        }
    }

    /// 分配优先级
    ///
    /// 可自营作业按复合键升序排列后做一次折叠:
    /// 折叠状态为 (当前计数, 上一条的键),键变化时计数加一,计数从 1 开始。
    pub fn rank(&self, jobs: &[ResolvedJob]) -> Vec<PrioritizedJob> {
        let mut priorities = vec![CANNOT_DO_PRIORITY; jobs.len()];

        let mut doable: Vec<(RankKey, usize)> = jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| job.can_do_internally)
            .map(|(idx, job)| (self.rank_key(job), idx))
            .collect();
        doable.sort_by_key(|(key, _)| *key);

        let last = doable
            .iter()
            .fold(None::<(i32, RankKey)>, |state, (key, idx)| {
                let priority = match state {
                    Some((counter, prev)) if prev == *key => counter,
                    Some((counter, _)) => counter + 1,
                    None => 1,
                };
                priorities[*idx] = priority;
                Some((priority, *key))
            });

        info!(
            total = jobs.len(),
            doable = doable.len(),
            cannot_do = jobs.len() - doable.len(),
            levels = last.map(|(counter, _)| counter).unwrap_or(0),
            granularity = %self.granularity,
            "优先级分配完成"
        );

        jobs.iter()
            .zip(priorities)
            .map(|(job, priority)| PrioritizedJob {
                job: job.job.clone(),
                due_at: job.due_at,
                can_do_internally: job.can_do_internally,
                needs_capability_check: job.needs_capability_check,
                priority,
                cannot_do_flag: !job.can_do_internally,
                capability_check_flag: job.needs_capability_check,
            })
            .collect()
    }
}

impl Default for PriorityRanker {
    fn default() -> Self {
        Self::new(TieGranularity::default())
    }
}
