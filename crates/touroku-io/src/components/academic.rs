//! Step 2: academic details.

use dioxus::prelude::*;

use touroku_core::{Branch, Field, FieldEdit, FormConfig, Gender, Wizard, YearOfStudy, OTHER_COLLEGE};

use super::field::{render_select, render_text_field};

/// Props for the [`AcademicStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct AcademicStepProps {
    wizard: Signal<Wizard>,
}

/// College, year of study, branch, and gender selects, with the
/// free-text college field when "Other" is chosen.
#[component]
pub fn AcademicStep(props: AcademicStepProps) -> Element {
    let mut wizard = props.wizard;
    let config = use_context::<FormConfig>();
    let current = wizard.read();
    let draft = current.draft().clone();
    let errors = current.errors().clone();
    drop(current);

    let college_options: Vec<(String, String)> = config
        .colleges
        .iter()
        .chain(std::iter::once(&OTHER_COLLEGE))
        .map(|name| ((*name).to_owned(), (*name).to_owned()))
        .collect();

    let year_options: Vec<(String, String)> = config
        .enabled_years
        .iter()
        .map(|year| (year.wire_name().to_owned(), year.label().to_owned()))
        .collect();

    let branch_options: Vec<(String, String)> = Branch::ALL
        .iter()
        .map(|branch| (branch.wire_name().to_owned(), branch.wire_name().to_owned()))
        .collect();

    let gender_options: Vec<(String, String)> = Gender::ALL
        .iter()
        .map(|gender| (gender.wire_name().to_owned(), gender.label().to_owned()))
        .collect();

    let is_other = draft.college.as_deref() == Some(OTHER_COLLEGE);

    rsx! {
        div { class: "flex flex-col gap-4",
            {render_select(
                "college",
                "College",
                "Select your college",
                &college_options,
                draft.college.as_deref().unwrap_or(""),
                errors.get(&Field::College).map(String::as_str),
                move |v| {
                    let selection = (!v.is_empty()).then_some(v);
                    wizard.write().apply(FieldEdit::College(selection));
                },
            )}
            if is_other {
                {render_text_field(
                    "other-college",
                    "College Name",
                    "text",
                    "Name of your college",
                    &draft.other_college,
                    errors.get(&Field::OtherCollege).map(String::as_str),
                    move |v| wizard.write().apply(FieldEdit::OtherCollege(v)),
                )}
            }
            {render_select(
                "year-of-study",
                "Year of Study",
                "Select your year",
                &year_options,
                draft.year_of_study.map_or("", YearOfStudy::wire_name),
                errors.get(&Field::YearOfStudy).map(String::as_str),
                move |v| {
                    wizard.write().apply(FieldEdit::YearOfStudy(YearOfStudy::from_wire_name(&v)));
                },
            )}
            {render_select(
                "branch",
                "Branch",
                "Select your branch",
                &branch_options,
                draft.branch.map_or("", Branch::wire_name),
                errors.get(&Field::Branch).map(String::as_str),
                move |v| {
                    wizard.write().apply(FieldEdit::Branch(Branch::from_wire_name(&v)));
                },
            )}
            {render_select(
                "gender",
                "Gender",
                "Select your gender",
                &gender_options,
                draft.gender.map_or("", Gender::wire_name),
                errors.get(&Field::Gender).map(String::as_str),
                move |v| {
                    wizard.write().apply(FieldEdit::Gender(Gender::from_wire_name(&v)));
                },
            )}
        }
    }
}
