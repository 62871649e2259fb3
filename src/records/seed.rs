//! Sample roster, appointments and treatment plans the clinic app ships with

use super::schedule::{Appointment, TreatmentPlan};
use super::types::{ClinicDate, Gender, Location, Patient, Treatment, TreatmentImage};
use crate::errors::Result;

const PHOTO_4047878: &str =
    "https://images.pexels.com/photos/4047878/pexels-photo-4047878.jpeg?auto=compress&cs=tinysrgb&w=600";
const PHOTO_3993331: &str =
    "https://images.pexels.com/photos/3993331/pexels-photo-3993331.jpeg?auto=compress&cs=tinysrgb&w=600";
const PHOTO_3993212: &str =
    "https://images.pexels.com/photos/3993212/pexels-photo-3993212.jpeg?auto=compress&cs=tinysrgb&w=600";
const PHOTO_3997989: &str =
    "https://images.pexels.com/photos/3997989/pexels-photo-3997989.jpeg?auto=compress&cs=tinysrgb&w=600";
const PHOTO_5444000: &str =
    "https://images.pexels.com/photos/5444000/pexels-photo-5444000.jpeg?auto=compress&cs=tinysrgb&w=600";
const PHOTO_3768891: &str =
    "https://images.pexels.com/photos/3768891/pexels-photo-3768891.jpeg?auto=compress&cs=tinysrgb&w=600";

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    age: u32,
    gender: Gender,
    phone: &str,
    email: &str,
    location: Location,
    last_visit: &str,
    registered: &str,
    notes: &str,
) -> Result<Patient> {
    Ok(Patient {
        id: id.to_string(),
        name: name.to_string(),
        age,
        gender,
        phone: phone.to_string(),
        email: Some(email.to_string()),
        location,
        registered_date: ClinicDate::parse(registered)?,
        last_visit: ClinicDate::parse(last_visit)?,
        notes: notes.to_string(),
    })
}

fn treatment(
    id: &str,
    patient_id: &str,
    date: &str,
    treatment_type: &str,
    notes: &str,
    images: &[(&str, &str)],
) -> Result<Treatment> {
    Ok(Treatment {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        date: ClinicDate::parse(date)?,
        treatment_type: treatment_type.to_string(),
        notes: notes.to_string(),
        images: images
            .iter()
            .map(|(label, url)| TreatmentImage::new(*label, *url))
            .collect(),
    })
}

pub fn sample_patients() -> Result<Vec<Patient>> {
    Ok(vec![
        patient(
            "p1",
            "John Smith",
            35,
            Gender::Male,
            "123-456-7890",
            "john.smith@example.com",
            Location::Nashik,
            "10 Jun 2024",
            "10 Jan 2024",
            "Patient experiencing gradual hair loss over the past 5 years. No family history of baldness. \
             Has been using over-the-counter minoxidil with limited results. Blood work shows normal thyroid function.",
        )?,
        patient(
            "p2",
            "Priya Sharma",
            29,
            Gender::Female,
            "234-567-8901",
            "priya.sharma@example.com",
            Location::Pune,
            "12 Jun 2024",
            "15 Feb 2024",
            "Patient has diffuse thinning across the scalp. Has history of hormonal imbalance. \
             Started on combination therapy with minoxidil and oral supplements.",
        )?,
        patient(
            "p3",
            "Raj Patel",
            42,
            Gender::Male,
            "345-678-9012",
            "raj.patel@example.com",
            Location::Nashik,
            "8 Jun 2024",
            "5 Mar 2024",
            "Advanced male pattern baldness. Patient is a good candidate for FUE transplant. \
             Has scheduled procedure for next month.",
        )?,
        patient(
            "p4",
            "Ananya Desai",
            33,
            Gender::Female,
            "456-789-0123",
            "ananya.desai@example.com",
            Location::Bhusawal,
            "15 Jun 2024",
            "20 Mar 2024",
            "Post-pregnancy hair loss. Starting on PRP therapy. Has shown good initial response after first session.",
        )?,
        patient(
            "p5",
            "Vikram Singh",
            38,
            Gender::Male,
            "567-890-1234",
            "vikram.singh@example.com",
            Location::Pune,
            "5 Jun 2024",
            "12 Apr 2024",
            "Treating receding hairline with combination of medications and PRP therapy. \
             Has completed 2 out of 4 planned PRP sessions.",
        )?,
    ])
}

pub fn sample_treatments() -> Result<Vec<Treatment>> {
    Ok(vec![
        treatment(
            "t1",
            "p1",
            "10 Jun 2024",
            "PRP Therapy",
            "Second PRP session completed. Patient reports reduced hair fall. Visible improvement in crown area density. \
             Recommended continuing with current medication regimen.",
            &[("Front View", PHOTO_4047878), ("Crown View", PHOTO_3993331)],
        )?,
        treatment(
            "t2",
            "p1",
            "10 May 2024",
            "PRP Therapy",
            "First PRP session completed. Patient tolerated procedure well. Prescribed topical minoxidil 5% and \
             ketoconazole shampoo. Follow-up scheduled for 1 month.",
            &[("Front View", PHOTO_3993212), ("Side View", PHOTO_3997989)],
        )?,
        treatment(
            "t3",
            "p1",
            "10 Apr 2024",
            "Initial Consultation",
            "Initial assessment completed. Diagnosed with male pattern baldness (Norwood scale III-vertex). \
             Blood work ordered to rule out underlying issues. Discussed treatment options including medication, \
             PRP therapy, and hair transplant.",
            &[("Front View", PHOTO_3993212), ("Crown View", PHOTO_3997989)],
        )?,
        treatment(
            "t4",
            "p2",
            "12 Jun 2024",
            "Follow-up",
            "Patient showing good response to treatment. Hair density improving, especially in frontal region. \
             Continuing current medication regimen.",
            &[("Front View", PHOTO_5444000), ("Side View", PHOTO_3768891)],
        )?,
    ])
}

fn appointment(
    id: &str,
    patient_id: &str,
    date: &str,
    time: &str,
    doctor: &str,
    appointment_type: &str,
) -> Result<Appointment> {
    Ok(Appointment {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        date: ClinicDate::parse(date)?,
        time: Appointment::parse_time(time)?,
        doctor: doctor.to_string(),
        appointment_type: appointment_type.to_string(),
    })
}

pub fn sample_appointments() -> Result<Vec<Appointment>> {
    Ok(vec![
        appointment("a1", "p1", "28 Jun 2024", "10:30 AM", "Dr. Patel", "Regular Checkup")?,
        appointment("a2", "p1", "15 Jul 2024", "2:00 PM", "Dr. Sharma", "Treatment Session")?,
    ])
}

pub fn sample_treatment_plans() -> Vec<TreatmentPlan> {
    vec![
        TreatmentPlan {
            patient_id: "p1".to_string(),
            planned_sessions: 8,
        },
        TreatmentPlan {
            patient_id: "p5".to_string(),
            planned_sessions: 4,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sizes() {
        assert_eq!(sample_patients().unwrap().len(), 5);
        assert_eq!(sample_treatments().unwrap().len(), 4);
        assert_eq!(sample_appointments().unwrap().len(), 2);
    }

    #[test]
    fn test_every_sample_treatment_has_a_thumbnail() {
        for t in sample_treatments().unwrap() {
            assert!(t.primary_image().is_some(), "{} has no images", t.id);
        }
    }
}
