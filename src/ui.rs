use crate::models::DateKey;

pub fn render_index(today: DateKey) -> String {
    INDEX_HTML.replace("{{TODAY}}", &today.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Cycle Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #fbf1f0;
      --bg-2: #f6c9c4;
      --ink: #2b2a28;
      --accent: #d63031;
      --accent-2: #5b3a4a;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(91, 58, 74, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe6e2 60%, #fbf4f2 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      flex-wrap: wrap;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid rgba(91, 58, 74, 0.25);
    }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .month-nav h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .tile {
      position: relative;
      aspect-ratio: 1;
      border-radius: 14px;
      background: white;
      border: 1px solid rgba(91, 58, 74, 0.08);
      display: grid;
      place-items: center;
      cursor: pointer;
      padding: 0;
      color: var(--ink);
      font-weight: 500;
    }

    .tile.outside {
      visibility: hidden;
    }

    .tile.today {
      border-color: var(--accent);
    }

    .tile.visited {
      background: #fff7f6;
    }

    .tile .num {
      position: absolute;
      top: 6px;
      left: 8px;
      font-size: 0.8rem;
    }

    .tile .dot {
      border-radius: 50%;
    }

    dialog {
      border: none;
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 24px;
      width: min(420px, 92vw);
    }

    dialog::backdrop {
      background: rgba(43, 42, 40, 0.35);
    }

    fieldset {
      border: 1px solid rgba(91, 58, 74, 0.12);
      border-radius: 14px;
      margin: 0 0 14px;
      padding: 12px 14px;
    }

    fieldset[disabled] {
      opacity: 0.45;
    }

    legend label {
      font-weight: 600;
    }

    .options {
      display: flex;
      gap: 14px;
      flex-wrap: wrap;
      margin-top: 6px;
    }

    .pain-scale {
      display: grid;
      grid-template-columns: repeat(10, 1fr);
      gap: 4px;
      margin-top: 8px;
    }

    .pain-scale button {
      border-radius: 6px;
      padding: 10px 0;
      font-size: 0.75rem;
      color: var(--ink);
    }

    .modal-actions {
      display: flex;
      justify-content: space-between;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #5f5c57;
    }

    .status[data-type="error"] {
      color: #c0392b;
    }

    .status[data-type="ok"] {
      color: #2e7d32;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Cycle Log</h1>
      <button type="button" id="export">Export log</button>
    </header>

    <div class="month-nav">
      <button class="ghost" type="button" id="prev" aria-label="Previous month">&larr;</button>
      <h2 id="month-label"></h2>
      <button class="ghost" type="button" id="next" aria-label="Next month">&rarr;</button>
    </div>

    <div class="calendar" id="calendar"></div>
    <div class="status" id="status"></div>
  </main>

  <dialog id="day-modal">
    <h2 id="modal-date"></h2>

    <fieldset id="flow-set">
      <legend><label><input type="checkbox" id="flow-present" /> Flow</label></legend>
      <div class="options">
        <label><input type="radio" name="flow" value="light" /> Light</label>
        <label><input type="radio" name="flow" value="regular" /> Regular</label>
        <label><input type="radio" name="flow" value="heavy" /> Heavy</label>
      </div>
    </fieldset>

    <fieldset id="cramps-set">
      <legend><label><input type="checkbox" id="cramps-present" /> Cramps</label></legend>
      <div class="pain-scale" id="pain-scale"></div>
    </fieldset>

    <fieldset id="mood-set">
      <legend><label><input type="checkbox" id="mood-present" /> Mood</label></legend>
      <div class="options">
        <label><input type="radio" name="mood" value="fair" /> Fair</label>
        <label><input type="radio" name="mood" value="good" /> Good</label>
        <label><input type="radio" name="mood" value="great" /> Great</label>
      </div>
    </fieldset>

    <div class="modal-actions">
      <button class="ghost" type="button" id="clear-day">Clear day</button>
      <button type="button" id="close-modal">Done</button>
    </div>
  </dialog>

  <script>
    const today = '{{TODAY}}';
    const calendarEl = document.getElementById('calendar');
    const monthLabelEl = document.getElementById('month-label');
    const statusEl = document.getElementById('status');
    const modalEl = document.getElementById('day-modal');
    const modalDateEl = document.getElementById('modal-date');
    const painScaleEl = document.getElementById('pain-scale');
    const presence = {
      flow: document.getElementById('flow-present'),
      cramps: document.getElementById('cramps-present'),
      mood: document.getElementById('mood-present')
    };
    const fieldsets = {
      flow: document.getElementById('flow-set'),
      cramps: document.getElementById('cramps-set'),
      mood: document.getElementById('mood-set')
    };
    const weekdays = ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun'];

    let [viewYear, viewMonth] = today.split('-').map(Number);
    let days = new Map();
    let revision = -1;
    let openDate = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flash = (message, type) => {
      setStatus(message, type);
      setTimeout(() => setStatus('', ''), 2400);
    };

    const pad = (value) => String(value).padStart(2, '0');

    const request = async (path, options = {}) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    const post = async (path, body) => {
      const res = await request(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      return res.json();
    };

    const renderCalendar = () => {
      const first = new Date(viewYear, viewMonth - 1, 1);
      const daysInMonth = new Date(viewYear, viewMonth, 0).getDate();
      const leading = (first.getDay() + 6) % 7;

      monthLabelEl.textContent = first.toLocaleDateString(undefined, { month: 'long', year: 'numeric' });
      calendarEl.innerHTML = weekdays.map((day) => `<div class="weekday">${day}</div>`).join('');

      for (let i = 0; i < leading; i += 1) {
        calendarEl.insertAdjacentHTML('beforeend', '<div class="tile outside"></div>');
      }

      for (let day = 1; day <= daysInMonth; day += 1) {
        const date = `${viewYear}-${pad(viewMonth)}-${pad(day)}`;
        const entry = days.get(date);
        const tile = document.createElement('button');
        tile.type = 'button';
        tile.className = 'tile';
        if (date === today) {
          tile.classList.add('today');
        }
        if (entry) {
          tile.classList.add('visited');
        }
        tile.innerHTML = `<span class="num">${day}</span>`;
        if (entry && entry.tile.visible) {
          const size = entry.tile.diameterUnits;
          tile.insertAdjacentHTML(
            'beforeend',
            `<span class="dot" style="width:${size}px;height:${size}px;background:${entry.tile.color}"></span>`
          );
        }
        tile.addEventListener('click', () => openDay(date).catch((err) => flash(err.message, 'error')));
        calendarEl.appendChild(tile);
      }
    };

    const loadLog = async () => {
      const res = await request('/api/log');
      const data = await res.json();
      if (data.revision === revision) {
        return;
      }
      revision = data.revision;
      days = new Map(data.days.map((day) => [day.date, day]));
      renderCalendar();
    };

    const setRadio = (name, value) => {
      document.querySelectorAll(`input[name="${name}"]`).forEach((input) => {
        input.checked = input.value === value;
      });
    };

    const renderDay = (view) => {
      const record = view.record || {};
      modalDateEl.textContent = view.date;
      presence.flow.checked = Boolean(record.flowPresent);
      presence.cramps.checked = Boolean(record.crampsPresent);
      presence.mood.checked = Boolean(record.moodPresent);
      fieldsets.flow.querySelector('.options').toggleAttribute('inert', !record.flowPresent);
      fieldsets.mood.querySelector('.options').toggleAttribute('inert', !record.moodPresent);
      setRadio('flow', record.flowPresent ? record.flowLevel : null);
      setRadio('mood', record.moodPresent ? record.moodType : null);

      painScaleEl.innerHTML = '';
      view.painScale.forEach((cell) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = cell.level;
        button.style.background = cell.color;
        button.setAttribute('aria-pressed', String(cell.filled));
        button.addEventListener('click', () => {
          command('cramps', { level: cell.level });
        });
        painScaleEl.appendChild(button);
      });
    };

    const command = (action, body) => {
      const path = `/api/days/${openDate}/${action}`;
      post(path, body)
        .then((view) => {
          renderDay(view);
          return loadLog();
        })
        .catch((err) => flash(err.message, 'error'));
    };

    const openDay = async (date) => {
      openDate = date;
      const view = await post(`/api/days/${date}`);
      renderDay(view);
      modalEl.showModal();
      await loadLog();
    };

    Object.entries(presence).forEach(([field, input]) => {
      input.addEventListener('change', () => command('toggle', { field }));
    });

    document.querySelectorAll('input[name="flow"]').forEach((input) => {
      input.addEventListener('change', () => command('flow', { level: input.value }));
    });

    document.querySelectorAll('input[name="mood"]').forEach((input) => {
      input.addEventListener('change', () => command('mood', { mood: input.value }));
    });

    document.getElementById('clear-day').addEventListener('click', () => command('clear'));
    document.getElementById('close-modal').addEventListener('click', () => modalEl.close());

    document.getElementById('prev').addEventListener('click', () => {
      viewMonth -= 1;
      if (viewMonth < 1) {
        viewMonth = 12;
        viewYear -= 1;
      }
      renderCalendar();
    });

    document.getElementById('next').addEventListener('click', () => {
      viewMonth += 1;
      if (viewMonth > 12) {
        viewMonth = 1;
        viewYear += 1;
      }
      renderCalendar();
    });

    document.getElementById('export').addEventListener('click', async () => {
      try {
        const res = await request('/api/export');
        const disposition = res.headers.get('content-disposition') || '';
        const match = disposition.match(/filename="([^"]+)"/);
        const blob = await res.blob();
        const url = URL.createObjectURL(blob);
        const link = document.createElement('a');
        link.href = url;
        link.download = match ? match[1] : 'cycle-log.json';
        document.body.appendChild(link);
        link.click();
        link.remove();
        URL.revokeObjectURL(url);
        flash('Log exported', 'ok');
      } catch (err) {
        flash(`Export failed: ${err.message}`, 'error');
      }
    });

    loadLog().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
