use std::collections::VecDeque;

use ft_list::controller::*;
use ft_list::models::{Entry, EntryList};
use ft_list::render::{ListSurface, ListView};
use ft_list::store::{CookieJar, EntryStore, KeyValueStore, COOKIE_NAME};
use speculate2::speculate;

/// Dialogs that replay scripted answers and record what was asked.
#[derive(Default)]
struct ScriptedDialogs {
    texts: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    prompts: Vec<String>,
    questions: Vec<String>,
}

impl ScriptedDialogs {
    fn answer(&mut self, text: Option<&str>) {
        self.texts.push_back(text.map(str::to_string));
    }

    fn confirm_with(&mut self, yes: bool) {
        self.confirms.push_back(yes);
    }
}

impl Dialogs for ScriptedDialogs {
    fn request_text(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.texts.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }
}

type TestController = Controller<CookieJar, ScriptedDialogs, ListView>;

fn controller_with(jar: CookieJar) -> TestController {
    let mut controller = Controller::new(EntryStore::new(jar), ScriptedDialogs::default(), ListView::new());
    controller.start();
    controller
}

fn create(controller: &mut TestController, text: Option<&str>) -> Outcome {
    controller.dialogs_mut().answer(text);
    controller.create()
}

fn state_texts(controller: &TestController) -> Vec<String> {
    controller.entries().iter().map(|e| e.text.clone()).collect()
}

fn view_texts(controller: &TestController) -> Vec<String> {
    controller.view().nodes().iter().map(|n| n.label.clone()).collect()
}

fn stored(controller: &TestController) -> Option<String> {
    controller.store().inner().get(COOKIE_NAME)
}

fn seeded_jar() -> CookieJar {
    let mut store = EntryStore::new(CookieJar::new());
    store
        .save(&EntryList::from_entries(vec![
            Entry::new("x", "X"),
            Entry::new("y", "Y"),
            Entry::new("z", "Z"),
        ]))
        .expect("Failed to seed");
    store.inner().clone()
}

speculate! {
    describe "start" {
        it "renders persisted entries in stored order" {
            let controller = controller_with(seeded_jar());
            assert_eq!(state_texts(&controller), vec!["X", "Y", "Z"]);
            assert_eq!(view_texts(&controller), vec!["X", "Y", "Z"]);
        }

        it "starts empty from an empty jar" {
            let controller = controller_with(CookieJar::new());
            assert!(controller.entries().is_empty());
            assert!(controller.view().nodes().is_empty());
        }
    }

    describe "create" {
        before {
            let mut controller = controller_with(CookieJar::new());
        }

        it "puts the newest entry on top of state and view" {
            create(&mut controller, Some("A"));
            create(&mut controller, Some("B"));
            create(&mut controller, Some("C"));

            assert_eq!(state_texts(&controller), vec!["C", "B", "A"]);
            assert_eq!(view_texts(&controller), vec!["C", "B", "A"]);
        }

        it "keeps the same order after a reload" {
            create(&mut controller, Some("A"));
            create(&mut controller, Some("B"));
            create(&mut controller, Some("C"));

            let reloaded = controller_with(controller.store().inner().clone());
            assert_eq!(state_texts(&reloaded), vec!["C", "B", "A"]);
            assert_eq!(view_texts(&reloaded), vec!["C", "B", "A"]);
        }

        it "trims the text and persists the list" {
            let outcome = create(&mut controller, Some("  buy milk \t"));

            let entry = match outcome {
                Outcome::Created(entry) => entry,
                other => panic!("expected Created, got {other:?}"),
            };
            assert_eq!(entry.text, "buy milk");
            assert_eq!(controller.view().nodes()[0].entry_id, entry.id);
            assert_eq!(
                stored(&controller),
                Some(serde_json::to_string(&vec![entry]).expect("serialize"))
            );
        }

        it "asks with the create prompt" {
            create(&mut controller, Some("A"));
            assert_eq!(controller.dialogs_mut().prompts, vec![CREATE_PROMPT.to_string()]);
        }

        it "does nothing when the prompt is cancelled" {
            create(&mut controller, Some("A"));
            let before = stored(&controller);

            assert_eq!(create(&mut controller, None), Outcome::Cancelled);
            assert_eq!(state_texts(&controller), vec!["A"]);
            assert_eq!(view_texts(&controller), vec!["A"]);
            assert_eq!(stored(&controller), before);
        }

        it "does nothing for whitespace-only input" {
            assert_eq!(create(&mut controller, Some("   \t ")), Outcome::Empty);
            assert_eq!(create(&mut controller, Some("")), Outcome::Empty);
            assert!(controller.entries().is_empty());
            assert!(controller.view().nodes().is_empty());
            assert_eq!(stored(&controller), None);
        }

        it "gives every entry a distinct id" {
            for i in 0..50 {
                create(&mut controller, Some(&format!("item {i}")));
            }
            let mut ids: Vec<&str> = controller.entries().iter().map(|e| e.id.as_str()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 50);
        }

        it "adds text directly without prompting" {
            assert!(matches!(controller.add("direct"), Outcome::Created(_)));
            assert!(controller.dialogs_mut().prompts.is_empty());
            assert_eq!(state_texts(&controller), vec!["direct"]);
        }
    }

    describe "delete" {
        before {
            let mut controller = controller_with(seeded_jar());
        }

        it "removes exactly the confirmed entry" {
            controller.dialogs_mut().confirm_with(true);
            let outcome = controller.delete("y");

            assert_eq!(outcome, Outcome::Deleted(Entry::new("y", "Y")));
            assert_eq!(state_texts(&controller), vec!["X", "Z"]);
            assert_eq!(view_texts(&controller), vec!["X", "Z"]);
            assert!(controller.view().nodes().iter().all(|n| n.entry_id != "y"));
            assert_eq!(
                stored(&controller),
                Some(r#"[{"id":"x","text":"X"},{"id":"z","text":"Z"}]"#.to_string())
            );
        }

        it "echoes the entry text in the confirmation" {
            controller.dialogs_mut().confirm_with(true);
            controller.delete("z");
            assert_eq!(
                controller.dialogs_mut().questions,
                vec!["Remove this TO DO?\n\n- Z".to_string()]
            );
        }

        it "keeps everything when the confirmation is declined" {
            let before = stored(&controller);
            controller.dialogs_mut().confirm_with(false);

            assert_eq!(controller.delete("y"), Outcome::Declined);
            assert_eq!(state_texts(&controller), vec!["X", "Y", "Z"]);
            assert_eq!(view_texts(&controller), vec!["X", "Y", "Z"]);
            assert_eq!(stored(&controller), before);
        }

        it "ignores an unknown id without asking" {
            assert_eq!(controller.delete("nope"), Outcome::NotFound);
            assert_eq!(controller.delete("x "), Outcome::NotFound);
            assert!(controller.dialogs_mut().questions.is_empty());
            assert_eq!(state_texts(&controller), vec!["X", "Y", "Z"]);
        }

        it "treats a second delete of the same id as stale" {
            controller.dialogs_mut().confirm_with(true);
            controller.delete("x");
            assert_eq!(controller.delete("x"), Outcome::NotFound);
        }
    }
}
