//! SQL script writer
//!
//! Writes one contiguous block of statements per food, followed by a blank
//! line. Each block is flushed as soon as it is complete, so a script cut
//! short after any blank line is still valid up to that point. Labels are
//! collapsed onto one line when planned, so a literal never holds a blank line.

use std::io::Write;

use crate::plan::FoodPlan;

use super::statement::Statement;

/// Writes food plans as an ordered SQL script
pub struct ScriptWriter<W: Write> {
    out: W,
    foods: usize,
}

impl<W: Write> ScriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, foods: 0 }
    }

    /// Write every statement of `plan`, then the blank separator
    pub fn write_food(&mut self, plan: &FoodPlan) -> std::io::Result<()> {
        self.write_statements(&plan.statements())
    }

    fn write_statements(&mut self, statements: &[Statement]) -> std::io::Result<()> {
        for statement in statements {
            writeln!(self.out, "{}", statement.to_sql())?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        self.foods += 1;
        Ok(())
    }

    /// Number of food blocks written so far
    pub fn foods_written(&self) -> usize {
        self.foods
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{IdPlanner, IdStrategy};
    use crate::usda::FoodRecord;

    fn plan(json: &str, planner: &mut IdPlanner) -> FoodPlan {
        let record: FoodRecord = serde_json::from_str(json).unwrap();
        FoodPlan::build(&record, 1, planner).unwrap()
    }

    #[test]
    fn test_write_food_block() {
        let json = r#"{
            "description": "Nuts, almonds",
            "foodNutrients": [
                {"type": "FoodNutrient", "nutrient": {"name": "Protein", "unitName": "g"}, "amount": 21.2}
            ],
            "foodPortions": [
                {"measureUnit": {"abbreviation": "oz"}, "gramWeight": 28.35}
            ]
        }"#;

        let mut planner = IdPlanner::new(IdStrategy::Deferred);
        let mut writer = ScriptWriter::new(Vec::new());
        writer.write_food(&plan(json, &mut planner)).unwrap();
        assert_eq!(writer.foods_written(), 1);

        let script = String::from_utf8(writer.into_inner()).unwrap();
        let expected = "\
INSERT INTO food(id, name, user_id) VALUES((SELECT COALESCE(MAX(id), 0) + 1 FROM food), 'Nuts, almonds', 1);
INSERT INTO serving(id, food_id, unit, amount, relative) VALUES((SELECT COALESCE(MAX(id), 0) + 1 FROM serving), (SELECT MAX(id) FROM food), 'g', 100, NULL);
INSERT INTO serving_nutrient(serving_id, nutrient_id, amount) VALUES((SELECT MAX(id) FROM serving), (SELECT id FROM nutrient WHERE name = 'Protein'), 21.2);
CREATE TEMP TABLE base_serving_capture AS SELECT MAX(id) AS id FROM serving;
INSERT INTO serving(id, food_id, unit, amount, relative) VALUES((SELECT COALESCE(MAX(id), 0) + 1 FROM serving), (SELECT MAX(id) FROM food), 'oz', 28.35, (SELECT id FROM base_serving_capture));
DROP TABLE base_serving_capture;

";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let mut planner = IdPlanner::new(IdStrategy::Sequential {
            next_food: 1,
            next_serving: 1,
        });
        let mut writer = ScriptWriter::new(Vec::new());
        writer
            .write_food(&plan(r#"{"description": "Salt", "foodNutrients": []}"#, &mut planner))
            .unwrap();
        writer
            .write_food(&plan(r#"{"description": "Pepper", "foodNutrients": []}"#, &mut planner))
            .unwrap();

        let script = String::from_utf8(writer.into_inner()).unwrap();
        let blocks: Vec<&str> = script.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            "INSERT INTO food(id, name, user_id) VALUES(2, 'Pepper', 1);\n\
             INSERT INTO serving(id, food_id, unit, amount, relative) VALUES(2, 2, 'g', 100, NULL);"
        );
    }

    #[test]
    fn test_multiline_name_stays_in_one_block() {
        let mut planner = IdPlanner::new(IdStrategy::Deferred);
        let mut writer = ScriptWriter::new(Vec::new());
        let json = r#"{
            "description": "Soup, tomato,\n\ncondensed",
            "foodNutrients": [],
            "foodPortions": [
                {"measureUnit": {"abbreviation": "undetermined"}, "portionDescription": "1 can\r\n\r\n(10.75 oz)", "gramWeight": 305}
            ]
        }"#;
        writer.write_food(&plan(json, &mut planner)).unwrap();

        let script = String::from_utf8(writer.into_inner()).unwrap();
        let blocks: Vec<&str> = script.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("'Soup, tomato, condensed'"));
        assert!(blocks[0].contains("'1 can (10.75 oz)'"));
    }
}
