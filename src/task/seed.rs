use super::Task;

const SEED: [(i64, &str, &str); 12] = [
    (
        1,
        "Complete React Native Project",
        "Finish implementing the dark theme and grid layout for the task manager application",
    ),
    (
        2,
        "Weekly Grocery Shopping",
        "Buy fruits, vegetables, milk, bread, and other essential items for the week",
    ),
    (
        3,
        "Morning Workout Routine",
        "30 mins cardio followed by strength training exercises and stretching",
    ),
    (
        4,
        "Team Meeting Preparation",
        "Prepare presentation slides and project status report for tomorrow's team meeting",
    ),
    (
        5,
        "Read Technical Documentation",
        "Study the latest React Native documentation updates and new features",
    ),
    (
        6,
        "Update Portfolio Website",
        "Add recent projects and update skills section with new technologies",
    ),
    (
        7,
        "Pay Monthly Bills",
        "Clear electricity, internet, and water bills before the due date",
    ),
    (
        8,
        "Schedule Dentist Appointment",
        "Book a routine checkup appointment with Dr. Smith for next week",
    ),
    (
        9,
        "Clean Home Office",
        "Organize desk, clean monitors, and arrange documents in the home office",
    ),
    (
        10,
        "Learn TypeScript",
        "Complete the advanced TypeScript course modules on interfaces and generics",
    ),
    (
        11,
        "Car Maintenance",
        "Take car for regular service and oil change at the service center",
    ),
    (
        12,
        "Write Blog Post",
        "Write an article about recent experiences with React Native development",
    ),
];

/// Return the fixed list of sample tasks.
///
pub fn seed_tasks() -> Vec<Task> {
    SEED.iter()
        .map(|(id, title, description)| Task::new(*id, *title, *description))
        .collect()
}
