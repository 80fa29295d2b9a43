use crate::ledger::{self, StatusTier};
use crate::models::{AttendanceRecord, Course, Ledger};

pub fn render_index(catalog: &[Course], ledger: &Ledger) -> String {
    let cards: String = catalog
        .iter()
        .map(|course| render_card(course, ledger.get(&course.code).unwrap_or_default()))
        .collect();

    INDEX_HTML
        .replace("{{COURSE_COUNT}}", &catalog.len().to_string())
        .replace("{{COURSE_CARDS}}", &cards)
}

fn render_card(course: &Course, record: AttendanceRecord) -> String {
    let pct = ledger::percentage(&record);
    let tier = StatusTier::from_percentage(pct);
    let disabled = if record.total == 0 { " disabled" } else { "" };

    format!(
        r#"<article class="course-card" data-course="{code}">
  <div class="course-header">
    <div class="course-title">
      <span class="color-dot" style="background: {color}"></span>
      <div>
        <h3 class="course-code">{code}</h3>
        <p class="course-name">{name}</p>
      </div>
    </div>
    <button class="undo-btn" type="button" data-action="undo" aria-label="Undo last action"{disabled}>&#8630;</button>
  </div>
  <div class="stats-row">
    <span class="stat-text"><strong data-field="attended">{attended}</strong> / <span data-field="total">{total}</span> classes</span>
    <span class="status-group">
      <span class="status-label {class}" data-field="status">{label}</span>
      <span class="badge {class}" data-field="badge">{pct}%</span>
    </span>
  </div>
  <div class="progress">
    <div class="progress-bar {class}" data-field="bar" style="width: {pct}%; background: {color}"></div>
  </div>
  <div class="actions">
    <button class="btn-attended" type="button" data-action="attended">&#10003; Attended</button>
    <button class="btn-missed" type="button" data-action="missed">&#10007; Missed</button>
  </div>
</article>
"#,
        code = escape_html(&course.code),
        name = escape_html(&course.name),
        color = escape_html(&course.color),
        attended = record.attended,
        total = record.total,
        pct = format_percentage(pct),
        label = tier.label(),
        class = tier.class(),
        disabled = disabled,
    )
}

fn format_percentage(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct:.1}")
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance Pro</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      --excellent: #2d7a4b;
      --good: #1f7a8c;
      --average: #b07d12;
      --low: #c2571b;
      --critical: #c63b2b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .course-count {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      padding: 8px 16px;
      font-weight: 600;
      color: var(--accent-2);
      font-size: 0.9rem;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .toolbar .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      cursor: pointer;
      box-shadow: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .courses-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
      gap: 16px;
    }

    .course-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    .course-card.animating-attended {
      box-shadow: 0 0 0 2px var(--excellent);
      transform: scale(1.01);
    }

    .course-card.animating-missed {
      box-shadow: 0 0 0 2px var(--critical);
      transform: scale(1.01);
    }

    .course-header {
      display: flex;
      align-items: flex-start;
      justify-content: space-between;
      gap: 10px;
    }

    .course-title {
      display: flex;
      align-items: flex-start;
      gap: 10px;
      min-width: 0;
    }

    .color-dot {
      flex: none;
      width: 12px;
      height: 12px;
      margin-top: 5px;
      border-radius: 50%;
    }

    .course-code {
      margin: 0;
      font-size: 1.05rem;
    }

    .course-name {
      margin: 2px 0 0;
      color: #6b645d;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.04em;
    }

    .undo-btn {
      flex: none;
      border: 1px solid rgba(47, 72, 88, 0.16);
      background: white;
      color: var(--accent-2);
      border-radius: 999px;
      width: 36px;
      height: 36px;
      font-size: 1.1rem;
      cursor: pointer;
      box-shadow: none;
    }

    .undo-btn:disabled {
      opacity: 0.35;
      cursor: default;
    }

    .stats-row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
    }

    .stat-text {
      font-size: 0.95rem;
      color: #5f5c57;
    }

    .stat-text strong {
      color: var(--accent-2);
      font-size: 1.05rem;
    }

    .status-group {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .status-label {
      font-size: 0.8rem;
      font-weight: 600;
      text-transform: uppercase;
      letter-spacing: 0.06em;
    }

    .badge {
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.8rem;
      font-weight: 600;
      color: white;
    }

    .status-label.excellent { color: var(--excellent); }
    .status-label.good { color: var(--good); }
    .status-label.average { color: var(--average); }
    .status-label.low { color: var(--low); }
    .status-label.critical { color: var(--critical); }

    .badge.excellent { background: var(--excellent); }
    .badge.good { background: var(--good); }
    .badge.average { background: var(--average); }
    .badge.low { background: var(--low); }
    .badge.critical { background: var(--critical); }

    .progress {
      height: 8px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .actions {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 10px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-attended {
      background: var(--excellent);
      color: white;
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    .btn-missed {
      background: var(--critical);
      color: white;
      box-shadow: 0 10px 24px rgba(198, 59, 43, 0.3);
    }

    footer {
      display: grid;
      justify-items: center;
      gap: 10px;
    }

    .reset-button {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .footer-note {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Attendance Pro</h1>
        <p class="subtitle">Tap Attended or Missed for each class.</p>
      </div>
      <span class="course-count">{{COURSE_COUNT}} courses</span>
    </header>

    <div class="toolbar">
      <p class="hint">Sessions per tap &mdash; use &times;2 or &times;4 to log a backlog at once.</p>
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-count="1" role="tab" aria-selected="true">&times;1</button>
        <button class="tab" type="button" data-count="2" role="tab" aria-selected="false">&times;2</button>
        <button class="tab" type="button" data-count="4" role="tab" aria-selected="false">&times;4</button>
      </div>
    </div>

    <section class="courses-grid" id="courses">
{{COURSE_CARDS}}
    </section>

    <div class="status" id="status"></div>

    <footer>
      <button class="reset-button" id="reset" type="button">Reset All Data</button>
      <p class="footer-note">Data is saved automatically on the server.</p>
    </footer>
  </main>

  <script>
    const grid = document.getElementById('courses');
    const statusEl = document.getElementById('status');
    const resetBtn = document.getElementById('reset');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let batchSize = 1;
    let animationTimer = null;
    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      clearTimeout(statusTimer);
      if (type === 'ok') {
        statusTimer = setTimeout(() => setStatus('', ''), 1200);
      }
    };

    const updateCard = (course) => {
      const card = grid.querySelector(`[data-course="${course.code}"]`);
      if (!card) {
        return;
      }
      card.querySelector('[data-field="attended"]').textContent = course.attended;
      card.querySelector('[data-field="total"]').textContent = course.total;

      const label = card.querySelector('[data-field="status"]');
      label.textContent = course.status;
      label.className = `status-label ${course.status_class}`;

      const badge = card.querySelector('[data-field="badge"]');
      badge.textContent = `${course.percentage}%`;
      badge.className = `badge ${course.status_class}`;

      const bar = card.querySelector('[data-field="bar"]');
      bar.style.width = `${course.percentage}%`;
      bar.className = `progress-bar ${course.status_class}`;

      card.querySelector('[data-action="undo"]').disabled = course.total === 0;
    };

    const animate = (code, kind) => {
      clearTimeout(animationTimer);
      grid.querySelectorAll('.course-card').forEach((card) => {
        card.classList.remove('animating-attended', 'animating-missed');
      });
      const card = grid.querySelector(`[data-course="${code}"]`);
      if (!card) {
        return;
      }
      card.classList.add(`animating-${kind}`);
      animationTimer = setTimeout(() => {
        card.classList.remove(`animating-${kind}`);
      }, 400);
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const sendRecord = async (course, outcome) => {
      setStatus('Saving...', 'info');
      const data = await post('/api/record', { course, outcome, count: batchSize });
      updateCard(data.course);
      if (data.feedback) {
        animate(data.feedback.course, data.feedback.kind);
      }
      setStatus('Saved', 'ok');
    };

    const sendUndo = async (course) => {
      setStatus('Saving...', 'info');
      const data = await post('/api/undo', { course });
      updateCard(data.course);
      setStatus('Saved', 'ok');
    };

    grid.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-action]');
      if (!button || button.disabled) {
        return;
      }
      const card = button.closest('.course-card');
      if (!card) {
        return;
      }
      const course = card.dataset.course;
      const action = button.dataset.action;
      const run = action === 'undo' ? sendUndo(course) : sendRecord(course, action);
      run.catch((err) => setStatus(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        batchSize = Number(button.dataset.count) || 1;
        tabs.forEach((tab) => {
          const isActive = tab === button;
          tab.classList.toggle('active', isActive);
          tab.setAttribute('aria-selected', String(isActive));
        });
      });
    });

    resetBtn.addEventListener('click', () => {
      if (!window.confirm('This will delete all your attendance data. Are you sure?')) {
        return;
      }
      setStatus('Resetting...', 'info');
      post('/api/reset')
        .then((data) => {
          data.courses.forEach(updateCard);
          setStatus('All data cleared', 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;
