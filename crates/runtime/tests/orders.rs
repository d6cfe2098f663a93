mod common;

use std::sync::Arc;

use march_core::{
    CityId, CityInfo, PlayerId, Position, TerrainKind, Unit, UnitId, UnitOrder,
};
use march_runtime::{
    CityRegistry, Event, InMemoryUnitRepo, OracleManager, RepositoryError, Runtime, Topic,
    UnitRepository,
};

use common::{HORSEMEN, HUMAN, RIVAL, WARRIORS, flat_map, load, roster, runtime, unit};

fn travelling(id: u32, from: (i32, i32), to: (i32, i32)) -> Unit {
    unit(id, HUMAN, WARRIORS, from, 3).with_order(UnitOrder::MoveTo(Position::new(to.0, to.1)))
}

#[tokio::test]
async fn goto_order_advances_one_step_per_turn_until_arrival() {
    let runtime = runtime(flat_map(20, 20));
    let mut orders = runtime.subscribe(Topic::Orders);
    runtime.spawn_unit(unit(1, HUMAN, WARRIORS, (0, 0), 3)).unwrap();

    let target = Position::new(5, 0);
    let first = runtime.execute_action(UnitId(1), "goto", Some(target)).await;
    assert!(first.success, "{}", first.message);
    assert_eq!(load(&runtime, 1).position, Position::new(1, 0));

    let mut turns = 0;
    loop {
        turns += 1;
        assert!(turns <= 10, "unit never arrived");

        runtime.refresh_movement(HUMAN).await.unwrap();
        let report = runtime.process_unit_orders(HUMAN).await.unwrap();
        assert_eq!(report.processed(), 1);
        assert!(report.cancelled.is_empty() && report.errored.is_empty());

        let unit = load(&runtime, 1);
        assert_eq!(unit.position, Position::new(1 + turns, 0));
        if report.completed == vec![UnitId(1)] {
            assert!(unit.orders.is_empty());
            break;
        }
        assert_eq!(report.advanced, vec![UnitId(1)]);
        assert_eq!(unit.orders, vec![UnitOrder::MoveTo(target)]);
    }

    assert_eq!(turns, 4);
    assert_eq!(load(&runtime, 1).position, target);
    assert_eq!(
        orders.recv().await.expect("order event"),
        Event::OrderCompleted(march_runtime::OrderCompleted {
            unit: UnitId(1),
            destination: target,
        })
    );

    // Nothing left to do.
    runtime.refresh_movement(HUMAN).await.unwrap();
    assert!(runtime.process_unit_orders(HUMAN).await.unwrap().is_empty());
}

#[tokio::test]
async fn each_call_takes_at_most_one_step() {
    let runtime = runtime(flat_map(20, 20));
    runtime
        .spawn_unit(
            unit(1, HUMAN, HORSEMEN, (0, 0), 6).with_order(UnitOrder::MoveTo(Position::new(9, 0))),
        )
        .unwrap();

    let report = runtime.process_unit_orders(HUMAN).await.unwrap();
    assert_eq!(report.advanced, vec![UnitId(1)]);

    let unit = load(&runtime, 1);
    assert_eq!(unit.position, Position::new(1, 0));
    assert_eq!(unit.moves_left, 3);
}

#[tokio::test]
async fn refused_step_clears_the_queue() {
    let cities = CityRegistry::new().with_city(
        Position::new(3, 2),
        CityInfo {
            id: CityId(1),
            owner: RIVAL,
        },
        "Nineveh",
    );
    let oracles =
        OracleManager::from_snapshots(flat_map(10, 10), roster()).with_cities(Arc::new(cities));
    let runtime = Runtime::builder().oracles(oracles).build().unwrap();
    let mut orders = runtime.subscribe(Topic::Orders);

    let mut blocked = travelling(1, (2, 2), (3, 2));
    blocked.orders.push(UnitOrder::MoveTo(Position::new(0, 0)));
    runtime.spawn_unit(blocked).unwrap();

    let report = runtime.process_unit_orders(HUMAN).await.unwrap();
    assert_eq!(report.cancelled.len(), 1);
    assert_eq!(report.cancelled[0].unit, UnitId(1));
    assert_eq!(report.cancelled[0].reason, "Cannot move onto an enemy city");
    assert_eq!(report.cancelled[0].code, "ACTION_ENEMY_CITY");

    let unit = load(&runtime, 1);
    assert!(unit.orders.is_empty());
    assert_eq!(unit.position, Position::new(2, 2));
    assert_eq!(unit.moves_left, 3);

    match orders.recv().await.expect("order event") {
        Event::OrderCancelled(cancelled) => assert_eq!(cancelled.unit, UnitId(1)),
        other => panic!("unexpected event {other:?}"),
    }

    // No automatic retry.
    assert!(runtime.process_unit_orders(HUMAN).await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_destination_cancels_with_reason() {
    let map = flat_map(10, 10).with_tile(Position::new(8, 8), TerrainKind::Lake);
    let runtime = runtime(map);
    runtime.spawn_unit(travelling(1, (1, 1), (8, 8))).unwrap();

    let report = runtime.process_unit_orders(HUMAN).await.unwrap();
    assert_eq!(report.cancelled.len(), 1);
    assert_eq!(report.cancelled[0].reason, "No valid path to target");
    assert_eq!(report.cancelled[0].code, "ACTION_NO_PATH");
}

#[tokio::test]
async fn only_the_players_ready_units_are_processed() {
    let runtime = runtime(flat_map(20, 20));
    runtime.spawn_unit(travelling(1, (1, 1), (5, 1))).unwrap();
    runtime
        .spawn_unit(travelling(2, (1, 3), (5, 3)).with_moves(0))
        .unwrap();
    runtime.spawn_unit(unit(3, HUMAN, WARRIORS, (1, 5), 3)).unwrap();
    runtime
        .spawn_unit(
            unit(4, RIVAL, WARRIORS, (1, 7), 3).with_order(UnitOrder::MoveTo(Position::new(5, 7))),
        )
        .unwrap();

    let report = runtime.process_unit_orders(HUMAN).await.unwrap();
    assert_eq!(report.advanced, vec![UnitId(1)]);
    assert_eq!(report.processed(), 1);

    assert_eq!(load(&runtime, 2).position, Position::new(1, 3));
    assert_eq!(load(&runtime, 4).position, Position::new(1, 7));
}

/// Unit store whose writes fail for one unit.
struct FlakyRepo {
    inner: InMemoryUnitRepo,
    broken: UnitId,
}

impl UnitRepository for FlakyRepo {
    fn insert(&self, unit: Unit) -> march_runtime::repository::Result<()> {
        self.inner.insert(unit)
    }

    fn get(&self, id: UnitId) -> march_runtime::repository::Result<Option<Unit>> {
        self.inner.get(id)
    }

    fn save(&self, unit: &Unit) -> march_runtime::repository::Result<()> {
        if unit.id == self.broken {
            return Err(RepositoryError::Backend("disk full".into()));
        }
        self.inner.save(unit)
    }

    fn remove(&self, id: UnitId) -> march_runtime::repository::Result<()> {
        self.inner.remove(id)
    }

    fn units_of(&self, player: PlayerId) -> march_runtime::repository::Result<Vec<Unit>> {
        self.inner.units_of(player)
    }

    fn units_at(&self, position: Position) -> march_runtime::repository::Result<Vec<Unit>> {
        self.inner.units_at(position)
    }

    fn list(&self) -> march_runtime::repository::Result<Vec<Unit>> {
        self.inner.list()
    }
}

#[tokio::test]
async fn storage_failure_on_one_unit_does_not_stop_the_batch() {
    let repo = FlakyRepo {
        inner: InMemoryUnitRepo::with_units([
            travelling(1, (1, 1), (6, 1)),
            travelling(2, (1, 3), (6, 3)),
            travelling(3, (1, 5), (6, 5)),
        ]),
        broken: UnitId(2),
    };
    let runtime = common::builder(flat_map(20, 20)).units(repo).build().unwrap();

    let report = runtime.process_unit_orders(HUMAN).await.unwrap();
    assert_eq!(report.advanced, vec![UnitId(1), UnitId(3)]);
    assert_eq!(report.errored.len(), 1);
    assert_eq!(report.errored[0].unit, UnitId(2));
    assert!(report.errored[0].reason.contains("disk full"));
    assert_eq!(report.errored[0].code, "RUNTIME_REPOSITORY");

    assert_eq!(load(&runtime, 2).position, Position::new(1, 3));
    assert_eq!(load(&runtime, 3).position, Position::new(2, 5));
}

#[tokio::test]
async fn refresh_restores_each_units_full_rate() {
    let runtime = runtime(flat_map(10, 10));
    runtime.spawn_unit(unit(1, HUMAN, WARRIORS, (1, 1), 0)).unwrap();
    runtime.spawn_unit(unit(2, HUMAN, HORSEMEN, (2, 2), 1)).unwrap();
    runtime.spawn_unit(unit(3, RIVAL, HORSEMEN, (3, 3), 0)).unwrap();

    assert_eq!(runtime.refresh_movement(HUMAN).await.unwrap(), 2);
    assert_eq!(load(&runtime, 1).moves_left, 3);
    assert_eq!(load(&runtime, 2).moves_left, 6);
    assert_eq!(load(&runtime, 3).moves_left, 0);
}

#[tokio::test]
async fn order_already_at_destination_completes_without_moving() {
    let runtime = runtime(flat_map(10, 10));
    runtime.spawn_unit(travelling(1, (4, 4), (4, 4))).unwrap();

    let report = runtime.process_unit_orders(PlayerId(1)).await.unwrap();
    assert_eq!(report.completed, vec![UnitId(1)]);
    let unit = load(&runtime, 1);
    assert!(unit.orders.is_empty());
    assert_eq!(unit.moves_left, 3);
}
