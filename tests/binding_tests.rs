use chrono::NaiveDate;
use roomdb::{
    Args, Dao, Database, DatabaseConfig, DbError, EntityInstance, InsertBinding, QueryBinding,
    Row, Value, entity, template_args,
};

entity! {
    pub struct Food {
        uid: PrimaryKey(Integer),
        name: Text,
        calories: Real,
    }
}

entity! {
    pub struct Habit {
        id: PrimaryKey(Integer),
        done: Boolean,
        day: Date,
    }
}

entity! {
    pub struct Order {
        id: PrimaryKey(Integer),
        order: Integer,
    }
}

template_args! {
    pub struct Search {
        pub query: String,
    }
}

struct FoodDao<'db> {
    dao: Dao<'db>,
    all: QueryBinding<Food>,
    search: QueryBinding<Food, Search>,
    insert: InsertBinding<Food>,
}

impl<'db> FoodDao<'db> {
    fn new(db: &'db Database) -> roomdb::Result<Self> {
        Ok(Self {
            dao: db.dao(),
            all: QueryBinding::new("SELECT * FROM {table}")?,
            search: QueryBinding::new("SELECT * FROM {table} WHERE name LIKE '%{query}%'")?,
            insert: InsertBinding::new()?,
        })
    }

    fn all_food(&self) -> roomdb::Result<Vec<Row>> {
        self.all.call(&self.dao, &())
    }

    fn search_food(&self, query: &str) -> roomdb::Result<Vec<Row>> {
        self.search.call(
            &self.dao,
            &Search {
                query: query.into(),
            },
        )
    }

    fn insert_food(&self, food: &[EntityInstance<Food>]) -> roomdb::Result<usize> {
        self.insert.call(&self.dao, food)
    }
}

fn food(uid: i64, name: &str, calories: f64) -> EntityInstance<Food> {
    Food::build(Args::new().arg(uid).arg(name).arg(calories)).unwrap()
}

#[test]
fn test_apple_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let dao = FoodDao::new(&db).unwrap();

    dao.insert_food(&[food(1, "Apple", 52.0)]).unwrap();

    assert_eq!(
        dao.all_food().unwrap(),
        vec![vec![
            Value::Integer(1),
            Value::Text("Apple".into()),
            Value::Real(52.0)
        ]]
    );
}

#[test]
fn test_round_trip_matches_instance_values() {
    let db = Database::open_in_memory().unwrap();
    let dao = FoodDao::new(&db).unwrap();
    let items = [food(1, "Apple", 52.0), food(2, "Fu-Kuchen", 123.0)];

    assert_eq!(dao.insert_food(&items).unwrap(), 2);

    let rows = dao.all_food().unwrap();
    let expected: Vec<Row> = items.iter().map(|i| i.values().to_vec()).collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_queries_on_fresh_database_create_the_table() {
    let db = Database::open_in_memory().unwrap();
    let dao = FoodDao::new(&db).unwrap();

    assert!(!dao.dao.check_table_exists("Food").unwrap());
    assert!(dao.search_food("Kuch").unwrap().is_empty());
    assert!(dao.dao.check_table_exists("Food").unwrap());
}

#[test]
fn test_search_substitutes_argument_text() {
    let db = Database::open_in_memory().unwrap();
    let dao = FoodDao::new(&db).unwrap();
    dao.insert_food(&[food(1, "Apple", 52.0), food(53, "Fu-Kuchen", 123.0)])
        .unwrap();

    let hits = dao.search_food("Kuch").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0][0], Value::Integer(53));

    assert_eq!(
        dao.search.sql(&Search { query: "Kuch".into() }).unwrap(),
        "SELECT * FROM `Food` WHERE name LIKE '%Kuch%'"
    );
}

#[test]
fn test_duplicate_key_in_batch_rolls_back() {
    let db = Database::open_in_memory().unwrap();
    db.execute("CREATE TABLE Food (uid INT PRIMARY KEY, name TEXT, calories REAL)", &[])
        .unwrap();
    let dao = FoodDao::new(&db).unwrap();

    let err = dao
        .insert_food(&[food(1, "Apple", 52.0), food(1, "Again", 1.0)])
        .unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(dao.all_food().unwrap().is_empty());
}

#[test]
fn test_booleans_and_dates_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let dao = db.dao();
    let insert = InsertBinding::<Habit>::new().unwrap();
    let all = QueryBinding::<Habit>::new("SELECT * FROM {table} ORDER BY id").unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let habits = [
        Habit::build(Args::new().arg(1).arg(true).arg(day)).unwrap(),
        Habit::build(Args::new().arg(2).arg(false).arg(day)).unwrap(),
    ];
    insert.call(&dao, &habits).unwrap();

    let rows = all.call(&dao, &()).unwrap();
    assert_eq!(rows[0], habits[0].values());
    assert_eq!(rows[1], habits[1].values());

    let raw = db.query("SELECT sum(done) FROM Habit").unwrap().rows;
    assert_eq!(raw, vec![vec![Value::Integer(1)]]);
}

#[test]
fn test_file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("food.db");

    {
        let db = Database::open(DatabaseConfig::file(&path)).unwrap();
        let dao = FoodDao::new(&db).unwrap();
        dao.insert_food(&[food(7, "Kiwi", 61.0)]).unwrap();
        db.close().unwrap();
    }

    let db = Database::open_target(path.to_str().unwrap()).unwrap();
    let dao = FoodDao::new(&db).unwrap();
    assert_eq!(
        dao.all_food().unwrap(),
        vec![vec![
            Value::Integer(7),
            Value::Text("Kiwi".into()),
            Value::Real(61.0)
        ]]
    );
}

#[test]
fn test_keyword_entity_through_bindings() {
    let db = Database::open_in_memory().unwrap();
    let dao = db.dao();
    let insert = InsertBinding::<Order>::new().unwrap();
    let sorted = QueryBinding::<Order>::new("SELECT * FROM {table} ORDER BY `order` DESC").unwrap();

    let orders = [
        Order::build(Args::new().arg(1).arg(5)).unwrap(),
        Order::build(Args::new().arg(2).arg(9)).unwrap(),
    ];
    assert_eq!(insert.call(&dao, &orders).unwrap(), 2);

    assert_eq!(
        sorted.sql(&()).unwrap(),
        "SELECT * FROM `Order` ORDER BY `order` DESC"
    );
    assert_eq!(
        sorted.call(&dao, &()).unwrap(),
        vec![
            vec![Value::Integer(2), Value::Integer(9)],
            vec![Value::Integer(1), Value::Integer(5)],
        ]
    );
}
