mod layout;
pub use layout::AppLayout;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

mod profile;
pub use profile::Profile;

mod goals;
pub use goals::Goals;

mod preventive_care;
pub use preventive_care::PreventiveCare;

mod patients;
pub use patients::{AssignGoals, Patients};

mod patient_management;
pub use patient_management::PatientManagement;
