//! Food log: declares an entity, wires a DAO from bindings and runs a few
//! inserts, searches and an update against an in-memory database.
//!
//! Run with `RUST_LOG=roomdb=debug cargo run --example food_log`.

use anyhow::Result;
use chrono::Local;
use roomdb::prelude::*;
use tracing_subscriber::EnvFilter;

entity! {
    pub struct Food {
        uid: PrimaryKey(Integer),
        name: Text,
        calories: Real,
        last_log: DateTime,
        importance: Real,
    }
}

template_args! {
    pub struct Search {
        pub query: String,
    }
}

struct FoodDao<'db> {
    dao: Dao<'db>,
    all_food: QueryBinding<Food>,
    search_food: QueryBinding<Food, Search>,
    insert_food: InsertBinding<Food>,
}

impl<'db> FoodDao<'db> {
    fn new(db: &'db Database) -> roomdb::Result<Self> {
        Ok(Self {
            dao: db.dao(),
            all_food: QueryBinding::new("SELECT * FROM {table}")?,
            search_food: QueryBinding::new("SELECT * FROM {table} WHERE name LIKE '%{query}%'")?,
            insert_food: InsertBinding::new()?,
        })
    }

    fn all_food(&self) -> roomdb::Result<Vec<Row>> {
        self.all_food.call(&self.dao, &())
    }

    fn search_food(&self, query: &str) -> roomdb::Result<Vec<Row>> {
        self.search_food.call(
            &self.dao,
            &Search {
                query: query.to_string(),
            },
        )
    }

    fn insert_food(&self, food: &[EntityInstance<Food>]) -> roomdb::Result<usize> {
        self.insert_food.call(&self.dao, food)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let db = Database::open(DatabaseConfig::in_memory())?;
    let food_dao = FoodDao::new(&db)?;

    println!("{:?}", food_dao.search_food("Kuch")?);
    println!("{:?}", food_dao.all_food()?);

    let cake = Food::build(
        Args::new()
            .arg(53)
            .arg("Fu-Kuchen")
            .arg(Local::now().naive_local())
            .named("calories", 123.0)
            .named("importance", 3.2),
    )?;
    println!("{}", cake);
    food_dao.insert_food(std::slice::from_ref(&cake))?;
    println!("{:?}", food_dao.search_food("Kuch")?);

    let bean = Food::build(
        Args::new()
            .named("uid", 1)
            .named("name", "Bar Bean")
            .named("calories", 612.0)
            .named("last_log", Local::now().naive_local())
            .named("importance", 1.0),
    )?;
    food_dao.insert_food(&[bean])?;

    let lighter = Food::build(
        Args::new()
            .arg(53)
            .arg("Fu-Kuchen")
            .arg(20.315)
            .arg(Local::now().naive_local())
            .arg(3.2),
    )?;
    let update = lighter.update_statement();
    println!("{} {:?}", update.sql, update.params);
    food_dao.dao.update(&lighter)?;

    print!("{}", db.query("SELECT * FROM Food")?);
    print!("{}", db.table_info("Food")?);

    db.close()?;
    Ok(())
}
