use std::io::{BufRead, Write};

use crate::error::{ExplorerError, Result};
use crate::models::{
    date_domain, latitude_domain, longitude_domain, magnitude_domain, Field, Range, RangeValue,
    Selection,
};
use crate::processors::range_filter::{
    filter_date, filter_latitude, filter_longitude, filter_magnitude,
};

/// Wording of one interactive filter stage
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub field: Field,
    pub next: &'static str,
    pub choices: &'static str,
    /// Answer (case-insensitive) that confirms the stage
    pub confirm: &'static str,
}

pub const LATITUDE_STAGE: Stage = Stage {
    field: Field::Latitude,
    next: "longitude",
    choices: "Yes/No",
    confirm: "yes",
};

pub const LONGITUDE_STAGE: Stage = Stage {
    field: Field::Longitude,
    next: "dates",
    choices: "Ok/no",
    confirm: "ok",
};

pub const DATE_STAGE: Stage = Stage {
    field: Field::Date,
    next: "Magnitude",
    choices: "sure/no",
    confirm: "sure",
};

pub const MAGNITUDE_STAGE: Stage = Stage {
    field: Field::Magnitude,
    next: "Analysis",
    choices: "ok/no",
    confirm: "ok",
};

type StageFilter<'a, T> = fn(&Selection<'a>, &Range<T>) -> Result<Selection<'a>>;

/// Console conversation around the range filters
pub struct Prompter<'io, I, O> {
    input: &'io mut I,
    output: &'io mut O,
}

impl<'io, I: BufRead, O: Write> Prompter<'io, I, O> {
    pub fn new(input: &'io mut I, output: &'io mut O) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one line; end of input cancels the session
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExplorerError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Yes/no style question; an empty answer is asked once more
    pub fn confirm(&mut self, question: &str, word: &str) -> Result<bool> {
        let mut answer = self.ask(question)?;
        if answer.is_empty() {
            answer = self.ask(&format!("Please respond. {}", question))?;
        }
        Ok(answer.eq_ignore_ascii_case(word))
    }

    pub fn wants_manual_selection(&mut self) -> Result<bool> {
        let answer = self.ask("Do you want to manually enter the Data selection? Yes/No: ")?;
        Ok(answer.eq_ignore_ascii_case("yes"))
    }

    /// Latitude, longitude, date and magnitude stages in order
    pub fn select<'a>(&mut self, selection: &Selection<'a>) -> Result<Selection<'a>> {
        let selection = self.run_stage(
            selection,
            LATITUDE_STAGE,
            latitude_domain(),
            filter_latitude,
        )?;
        let selection = self.run_stage(
            &selection,
            LONGITUDE_STAGE,
            longitude_domain(),
            filter_longitude,
        )?;
        let selection = self.run_stage(&selection, DATE_STAGE, date_domain(), filter_date)?;
        self.run_stage(
            &selection,
            MAGNITUDE_STAGE,
            magnitude_domain(),
            filter_magnitude,
        )
    }

    /// Loop until the user confirms a non-empty, in-domain selection
    pub fn run_stage<'a, T: RangeValue>(
        &mut self,
        selection: &Selection<'a>,
        stage: Stage,
        domain: Range<T>,
        filter: StageFilter<'a, T>,
    ) -> Result<Selection<'a>> {
        loop {
            self.print_banner(stage, &domain)?;

            let answer = self.ask(&format!("Enter minimum/maximum {} values: ", stage.field))?;
            let range = match Range::<T>::parse(&answer) {
                Ok(range) => range,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            if range.check_within(&domain, stage.field).is_err() {
                writeln!(self.output, "One or more values out of range <{}>", range)?;
                continue;
            }

            let selected = filter(selection, &range)?;
            writeln!(
                self.output,
                "Accepted...\nmin: {}, max: {}\nSelected {} records.\n",
                range.min().render(),
                range.max().render(),
                selected.len()
            )?;
            tracing::debug!(stage = %stage.field, %range, selected = selected.len(), "Stage filtered");

            if selected.is_empty() {
                writeln!(
                    self.output,
                    "Nothing to analyse in that range, please choose another."
                )?;
                continue;
            }

            let question = format!("Want to move on to {}? {}: ", stage.next, stage.choices);
            if self.confirm(&question, stage.confirm)? {
                return Ok(selected);
            }
        }
    }

    fn print_banner<T: RangeValue>(&mut self, stage: Stage, domain: &Range<T>) -> Result<()> {
        let format_hint = if stage.field == Field::Date {
            " mm/dd/yyyy"
        } else {
            ""
        };
        writeln!(
            self.output,
            "\nSELECT {}{}: enter two values separated by comma\nrange is {} through {}",
            stage.field,
            format_hint,
            domain.min().render(),
            domain.max().render()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::io::Cursor;

    fn records() -> Vec<Record> {
        [
            ("01/02/1965", "19.246", "145.616", "6.0"),
            ("03/11/2011", "38.297", "142.373", "9.1"),
            ("12/26/2004", "3.295", "95.982", "9.1"),
            ("06/15/1991", "-4.5", "-75.0", "5.5"),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(date, lat, lon, mag))| {
            Record::from_pairs(
                i + 1,
                &[
                    ("Date", date),
                    ("Latitude", lat),
                    ("Longitude", lon),
                    ("Magnitude", mag),
                ],
            )
        })
        .collect()
    }

    fn run(script: &str, records: &[Record]) -> (Result<Vec<usize>>, String) {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let result = {
            let mut prompter = Prompter::new(&mut input, &mut output);
            prompter
                .select(&Selection::all(records))
                .map(|s| s.iter().map(Record::row).collect())
        };
        (result, String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn test_full_interactive_selection() {
        let records = records();
        let script = "0,40\nyes\n90,150\nOK\n01/01/1990,12/30/2016\nsure\n9.1,9.0\nok\n";

        let (result, transcript) = run(script, &records);

        assert_eq!(result.unwrap(), vec![2, 3]);
        assert!(transcript.contains("SELECT latitude: enter two values separated by comma"));
        assert!(transcript.contains("range is -77.08 through 86.005"));
        assert!(transcript.contains("SELECT date mm/dd/yyyy"));
        assert!(transcript.contains("range is 01/02/1965 through 12/30/2016"));
        assert!(transcript.contains("Selected 3 records."));
        assert!(transcript.contains("Want to move on to Analysis? ok/no: "));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let records = records();
        let script = "abc\n-90,10\n-10,10\nyes\n-179.997,179.998\nok\n\
                      01/02/1965,12/30/2016\nsure\n5.5,9.1\nok\n";

        let (result, transcript) = run(script, &records);

        assert_eq!(result.unwrap(), vec![3, 4]);
        assert!(transcript.contains("Invalid range input"));
        assert!(transcript.contains("One or more values out of range <(-90,10)>"));
    }

    #[test]
    fn test_empty_confirmation_asks_again() {
        let records = records();
        let script = "0,40\n\nyes\n-179.997,179.998\nok\n\
                      01/02/1965,12/30/2016\nsure\n5.5,9.1\nok\n";

        let (result, transcript) = run(script, &records);

        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert!(transcript.contains("Please respond. Want to move on to longitude? Yes/No: "));
    }

    #[test]
    fn test_declining_reenters_stage() {
        let records = records();
        let script = "0,40\nno\n-10,10\nyes\n-179.997,179.998\nok\n\
                      01/02/1965,12/30/2016\nsure\n5.5,9.1\nok\n";

        let (result, transcript) = run(script, &records);

        assert_eq!(result.unwrap(), vec![3, 4]);
        assert_eq!(transcript.matches("SELECT latitude").count(), 2);
    }

    #[test]
    fn test_empty_stage_cannot_be_confirmed() {
        let records = records();
        let script = "80,86\n0,40\nyes\n-179.997,179.998\nok\n\
                      01/02/1965,12/30/2016\nsure\n5.5,9.1\nok\n";

        let (result, transcript) = run(script, &records);

        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert!(transcript.contains("Selected 0 records."));
        assert!(transcript.contains("Nothing to analyse in that range"));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let records = records();
        let (result, _) = run("0,40\n", &records);
        assert!(matches!(result, Err(ExplorerError::Cancelled)));
    }

    #[test]
    fn test_manual_selection_switch() -> Result<()> {
        let mut input = Cursor::new("YES\n");
        let mut output = Vec::new();
        let mut prompter = Prompter::new(&mut input, &mut output);
        assert!(prompter.wants_manual_selection()?);
        assert!(matches!(
            prompter.wants_manual_selection(),
            Err(ExplorerError::Cancelled)
        ));
        Ok(())
    }
}
