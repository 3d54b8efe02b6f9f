//! Criterion benchmarks for the u-scouting daily loop.
//!
//! Uses synthetic leagues (every team at full roster, every scout busy)
//! to measure scheduler and report-generation overhead.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_scouting::pool::{FreeAgentConfig, FreeAgentGenerator};
use u_scouting::report::{GradedReportGeneratorConfig, PlayerProfile, ReportGenerator};
use u_scouting::{
    GradedReportGenerator, InMemoryDirectory, PlayerId, PlayerKind, Scout, ScoutId,
    ScoutingConfig, ScoutingOffice, ScoutingTarget, Specialization, TeamId,
};

const PLAYERS: u64 = 450;

fn opening_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 22).unwrap()
}

fn directory(rng: &mut StdRng) -> InMemoryDirectory {
    (1..=PLAYERS).fold(InMemoryDirectory::new(), |dir, id| {
        let kind = if id % 3 == 0 {
            PlayerKind::CollegeProspect
        } else {
            PlayerKind::NbaPlayer
        };
        dir.with_player(
            PlayerProfile::new(PlayerId(id), format!("Player {id}"), kind)
                .with_attribute("shooting", rng.random_range(30..=99))
                .with_attribute("defense", rng.random_range(30..=99))
                .with_attribute("athleticism", rng.random_range(30..=99)),
        )
    })
}

fn league(teams: u32) -> ScoutingOffice {
    let config = ScoutingConfig::default();
    let mut office = ScoutingOffice::new(config.clone(), opening_day()).unwrap();
    let mut next_scout = 1;
    for team in 1..=teams {
        for _ in 0..config.max_scouts {
            let scout = Scout::new(
                ScoutId(next_scout),
                format!("Scout {next_scout}"),
                Specialization::Pro,
                60,
            );
            office.hire(TeamId(team), scout).unwrap();
            next_scout += 1;
        }
    }
    office
}

/// Re-tasks every idle scout with a random player for a few days.
fn keep_busy(office: &mut ScoutingOffice, rng: &mut StdRng) {
    let idle: Vec<ScoutId> = office
        .teams()
        .collect::<Vec<_>>()
        .into_iter()
        .flat_map(|team| {
            office
                .list_available(team)
                .into_iter()
                .map(|s| s.id)
                .collect::<Vec<_>>()
        })
        .collect();
    for scout in idle {
        let player = PlayerId(rng.random_range(1..=PLAYERS));
        let days = rng.random_range(3..=14);
        let _ = office.assign(scout, ScoutingTarget::nba_player(player), days);
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_season_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("season_month");
    group.sample_size(10);

    for &teams in &[10u32, 30, 60] {
        let mut rng = StdRng::seed_from_u64(42);
        let dir = directory(&mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(teams), &dir, |b, dir| {
            b.iter(|| {
                let mut office = league(teams);
                let mut rng = StdRng::seed_from_u64(7);
                let mut reports = 0;
                for day in 1..=30 {
                    keep_busy(&mut office, &mut rng);
                    let date = opening_day() + Days::new(day);
                    for outcome in office.process_day_all(date, dir).unwrap() {
                        reports += outcome.reports().len();
                    }
                }
                black_box(reports)
            })
        });
    }
    group.finish();
}

fn bench_report_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_generation");

    let generator =
        GradedReportGenerator::new(GradedReportGeneratorConfig::default().with_seed(42)).unwrap();
    let scout = Scout::new(ScoutId(1), "Bench Scout", Specialization::College, 70);

    for &attributes in &[3usize, 10, 25] {
        let player = (0..attributes).fold(
            PlayerProfile::new(PlayerId(1), "Bench Player", PlayerKind::CollegeProspect),
            |p, i| p.with_attribute(format!("attr_{i}"), 40 + (i as u8 % 50)),
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(attributes),
            &player,
            |b, player| {
                b.iter(|| black_box(generator.generate(black_box(player), &scout, 2, 7)))
            },
        );
    }
    group.finish();
}

fn bench_free_agents(c: &mut Criterion) {
    let mut group = c.benchmark_group("free_agents");

    for &count in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut generator =
                    FreeAgentGenerator::new(FreeAgentConfig::default().with_seed(42)).unwrap();
                black_box(generator.generate(1, count))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_season_month,
    bench_report_generation,
    bench_free_agents
);
criterion_main!(benches);
