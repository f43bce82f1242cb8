//! UI Components

use leptos::prelude::*;
use paylink_client::PaymentForm;
use paylink_core::FormField;

/// Inline message under an input, from the last submit
#[component]
pub fn FieldError(form: RwSignal<PaymentForm>, field: FormField) -> impl IntoView {
    move || {
        form.with(|f| f.field_error(field).map(str::to_string))
            .map(|msg| view! { <p class="field-error" role="alert">{msg}</p> })
    }
}

/// Labelled text-like input bound to one form field
#[component]
pub fn TextField(
    form: RwSignal<PaymentForm>,
    field: FormField,
    label: &'static str,
    input_type: &'static str,
    #[prop(optional)] step: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label for=field.name()>{label}</label>
            <input
                type=input_type
                id=field.name()
                name=field.name()
                step=step
                class=move || form.with(|f| f.input_style(field).css_class())
                prop:value=move || form.with(|f| f.value(field).to_string())
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
            />
            <FieldError form=form field=field />
        </div>
    }
}

/// Dismissable top-level error
#[component]
pub fn ErrorBanner(form: RwSignal<PaymentForm>) -> impl IntoView {
    move || {
        form.with(|f| f.error().map(str::to_string)).map(|msg| {
            view! {
                <div class="error-banner">
                    <p role="alert">{msg}</p>
                    <button
                        type="button"
                        class="dismiss"
                        aria-label="Dismiss"
                        on:click=move |_| form.update(PaymentForm::dismiss_error)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}

/// Submit control, disabled while a submission is pending
#[component]
pub fn SubmitButton(form: RwSignal<PaymentForm>) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary" disabled=move || form.with(PaymentForm::is_pending)>
            {move || form.with(PaymentForm::submit_label)}
        </button>
    }
}

/// Shown in place of the form once the payment is accepted
#[component]
pub fn Confirmation() -> impl IntoView {
    view! {
        <div class="confirmation">
            <h2>"Payment Successful!"</h2>
            <p>"Thank you for your payment"</p>
        </div>
    }
}
