//! `/providers` endpoints.

use serde_json::Value;
use store::requests::{AssignGoalRequest, AssignPatientRequest, ModifyGoalRequest};
use store::{User, WellnessGoal};

use crate::{ApiClient, Result};

impl ApiClient {
    /// Patients assigned to the signed-in provider.
    pub async fn patients(&self) -> Result<Vec<User>> {
        self.get("/providers/patients").await
    }

    pub async fn assign_patient(&self, request: &AssignPatientRequest) -> Result<Value> {
        self.post("/providers/assign-patient", request).await
    }

    pub async fn assign_goal(&self, request: &AssignGoalRequest) -> Result<Value> {
        self.post("/providers/assign-goals", request).await
    }

    pub async fn patient_goals(&self, patient_id: &str) -> Result<Vec<WellnessGoal>> {
        self.get(&format!("/providers/patients/{patient_id}/goals"))
            .await
    }

    pub async fn modify_goal(&self, goal_id: &str, request: &ModifyGoalRequest) -> Result<Value> {
        self.put(&format!("/providers/goals/{goal_id}/modify"), request)
            .await
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<Value> {
        self.delete(&format!("/providers/goals/{goal_id}")).await
    }
}
