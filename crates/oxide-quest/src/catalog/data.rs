//! Bundled curriculum: three levels with their tables and tasks.

use super::{Level, LevelId, Task};
use crate::dataset::{Dataset, Table};
use crate::row;
use crate::value::Row;

/// Keeps the rows whose `id` column appears in `ids`, in the order given by `ids`.
pub(crate) fn pick(rows: &[Row], ids: &[i64]) -> Vec<Row> {
    ids.iter()
        .filter_map(|id| {
            rows.iter()
                .find(|row| row.get("id").and_then(crate::value::Value::as_int) == Some(*id))
                .cloned()
        })
        .collect()
}

/// Projects `rows` onto a single column.
pub(crate) fn project(rows: &[Row], column: &str) -> Vec<Row> {
    rows.iter()
        .filter_map(|row| row.get(column).map(|v| Row::new().with(column, v.clone())))
        .collect()
}

/// A one-row, one-column aggregate result such as `count(*)`.
pub(crate) fn scalar(column: &str, value: i64) -> Vec<Row> {
    vec![Row::new().with(column, value)]
}

pub(crate) fn pirates() -> Vec<Row> {
    vec![
        row! { "id" => 1, "name" => "Jack Sparrow", "gold" => 200, "ship" => "Black Pearl", "rank" => "Captain", "age" => 35 },
        row! { "id" => 2, "name" => "Will Turner", "gold" => 50, "ship" => "Interceptor", "rank" => "Blacksmith", "age" => 25 },
        row! { "id" => 3, "name" => "Elizabeth Swann", "gold" => 300, "ship" => "Black Pearl", "rank" => "Captain", "age" => 24 },
        row! { "id" => 4, "name" => "Hector Barbossa", "gold" => 150, "ship" => "Black Pearl", "rank" => "First Mate", "age" => 45 },
    ]
}

fn ships() -> Vec<Row> {
    vec![
        row! { "shipid" => 1, "name" => "Black Pearl", "captain" => "Jack Sparrow", "capacity" => 40 },
        row! { "shipid" => 2, "name" => "Interceptor", "captain" => "Will Turner", "capacity" => 30 },
        row! { "shipid" => 3, "name" => "Flying Dutchman", "captain" => "Davy Jones", "capacity" => 50 },
    ]
}

pub(crate) fn researchers() -> Vec<Row> {
    vec![
        row! { "id" => 1, "name" => "Dr. Alice Johnson", "department" => "Computer Science", "publications" => 45, "citations" => 1200, "h_index" => 15 },
        row! { "id" => 2, "name" => "Prof. Bob Smith", "department" => "Physics", "publications" => 60, "citations" => 1800, "h_index" => 20 },
        row! { "id" => 3, "name" => "Dr. Charlie Brown", "department" => "Biology", "publications" => 35, "citations" => 900, "h_index" => 12 },
        row! { "id" => 4, "name" => "Prof. Diana Martinez", "department" => "Computer Science", "publications" => 55, "citations" => 1500, "h_index" => 18 },
    ]
}

fn departments() -> Vec<Row> {
    vec![
        row! { "dept_id" => 1, "name" => "Computer Science", "head" => "Dr. Alice Johnson", "budget" => 500_000 },
        row! { "dept_id" => 2, "name" => "Physics", "head" => "Prof. Bob Smith", "budget" => 750_000 },
        row! { "dept_id" => 3, "name" => "Biology", "head" => "Dr. Charlie Brown", "budget" => 400_000 },
    ]
}

pub(crate) fn artifacts() -> Vec<Row> {
    vec![
        row! { "id" => 1, "name" => "Golden Mask", "origin" => "Egypt", "year" => -1350, "value" => 3_500_000, "condition" => "Excellent" },
        row! { "id" => 2, "name" => "Ancient Scroll", "origin" => "China", "year" => -200, "value" => 2_000_000, "condition" => "Good" },
        row! { "id" => 3, "name" => "Roman Sword", "origin" => "Italy", "year" => 100, "value" => 1_500_000, "condition" => "Fair" },
        row! { "id" => 4, "name" => "Mayan Tablet", "origin" => "Mexico", "year" => -500, "value" => 2_800_000, "condition" => "Very Good" },
        row! { "id" => 5, "name" => "Greek Vase", "origin" => "Greece", "year" => -450, "value" => 1_800_000, "condition" => "Good" },
    ]
}

fn expeditions() -> Vec<Row> {
    vec![
        row! { "exp_id" => 1, "location" => "Egypt", "leader" => "Dr. Sarah Connor", "year" => 2020, "budget" => 500_000 },
        row! { "exp_id" => 2, "location" => "China", "leader" => "Prof. James Lee", "year" => 2018, "budget" => 450_000 },
        row! { "exp_id" => 3, "location" => "Mexico", "leader" => "Dr. Maria Rodriguez", "year" => 2022, "budget" => 600_000 },
    ]
}

/// Researcher departments without duplicates, in first-seen order.
pub(crate) fn distinct_departments() -> Vec<Row> {
    let mut seen: Vec<Row> = Vec::new();
    for row in project(&researchers(), "department") {
        if !seen.contains(&row) {
            seen.push(row);
        }
    }
    seen
}

fn task(
    id: u32,
    question: &str,
    expected_query: &str,
    expected_result: Vec<Row>,
    hints: &[&str],
    difficulty: u32,
) -> Task {
    Task {
        id,
        question: question.to_string(),
        expected_query: expected_query.to_string(),
        expected_result,
        hints: hints.iter().map(ToString::to_string).collect(),
        difficulty,
    }
}

fn beginner() -> Level {
    let pirates = pirates();
    Level {
        id: LevelId::Beginner,
        name: "Beginner: Pirate's First Voyage".to_string(),
        theme: "pirates".to_string(),
        description: "Learn basic SQL SELECT and WHERE clauses with a pirate-themed database!"
            .to_string(),
        dataset: Dataset::new()
            .with_table(Table::new("pirates", pirates.clone()))
            .with_table(Table::new("ships", ships())),
        tasks: vec![
            task(
                1,
                "Find all pirates with gold > 100",
                "select * from pirates where gold > 100",
                pick(&pirates, &[1, 3, 4]),
                &[
                    "Use SELECT * with a WHERE clause",
                    "The column is 'gold'",
                    "Remember to use the > operator",
                ],
                1,
            ),
            task(
                2,
                "Get the names of pirates on 'Black Pearl'",
                "select name from pirates where ship = 'black pearl'",
                project(&pick(&pirates, &[1, 3, 4]), "name"),
                &[
                    "Use SELECT name",
                    "Filter with WHERE ship = 'Black Pearl'",
                    "You may want to use SELECT DISTINCT if duplicates appear",
                ],
                1,
            ),
            task(
                3,
                "Count how many pirates are captains",
                "select count(*) from pirates where rank = 'captain'",
                scalar("count(*)", 2),
                &[
                    "Use COUNT(*)",
                    "Filter with WHERE rank = 'Captain'",
                    "Use an aggregate function",
                ],
                2,
            ),
        ],
    }
}

fn intermediate() -> Level {
    let researchers = researchers();
    Level {
        id: LevelId::Intermediate,
        name: "Intermediate: Researcher's Insight".to_string(),
        theme: "academia".to_string(),
        description: "Dive into more complex SQL queries with academic research data!".to_string(),
        dataset: Dataset::new()
            .with_table(Table::new("researchers", researchers.clone()))
            .with_table(Table::new("departments", departments())),
        tasks: vec![
            task(
                1,
                "Find researchers with more than 40 publications",
                "select * from researchers where publications > 40",
                pick(&researchers, &[1, 2, 4]),
                &[
                    "Use SELECT * with a WHERE clause",
                    "Check the 'publications' column",
                    "Use > operator",
                ],
                2,
            ),
            task(
                2,
                "List distinct departments of researchers",
                "select distinct department from researchers",
                distinct_departments(),
                &["Use SELECT DISTINCT", "Select the 'department' column"],
                2,
            ),
            task(
                3,
                "Calculate average citations for Computer Science researchers",
                "select avg(citations) from researchers where department = 'computer science'",
                scalar("avg(citations)", 1350),
                &[
                    "Use AVG() aggregate function",
                    "Filter for Computer Science department",
                    "Apply WHERE clause before aggregation",
                ],
                3,
            ),
        ],
    }
}

fn expert() -> Level {
    let artifacts = artifacts();
    Level {
        id: LevelId::Expert,
        name: "Expert: Treasure Hunter's Challenge".to_string(),
        theme: "archaeology".to_string(),
        description: "Master advanced SQL techniques with archaeological artifact data!"
            .to_string(),
        dataset: Dataset::new()
            .with_table(Table::new("artifacts", artifacts.clone()))
            .with_table(Table::new("expeditions", expeditions())),
        tasks: vec![
            task(
                1,
                "Find artifacts with value > 2500000",
                "select * from artifacts where value > 2500000",
                pick(&artifacts, &[1, 4]),
                &[
                    "Use SELECT * with a WHERE clause",
                    "Filter artifacts by their 'value' column",
                    "Use > operator",
                ],
                3,
            ),
            task(
                2,
                "List artifacts from before year 0, sorted by value",
                "select * from artifacts where year < 0 order by value",
                pick(&artifacts, &[5, 2, 4, 1]),
                &["Use WHERE year < 0", "Hint: You might need ORDER BY clause"],
                4,
            ),
            task(
                3,
                "Calculate total value of artifacts in 'Excellent' condition",
                "select sum(value) from artifacts where condition = 'excellent'",
                scalar("sum(value)", 3_500_000),
                &[
                    "Use SUM() aggregate function",
                    "Filter by condition 'Excellent'",
                    "Apply WHERE clause before aggregation",
                ],
                4,
            ),
        ],
    }
}

/// All bundled levels in difficulty order.
pub(crate) fn levels() -> Vec<Level> {
    vec![beginner(), intermediate(), expert()]
}
